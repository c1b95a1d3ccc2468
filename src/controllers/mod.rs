pub mod destination;
pub mod door_interlock;
pub mod fleet_controller;
pub mod maintenance;

pub use destination::DestinationController;
pub use door_interlock::DoorInterlock;
pub use fleet_controller::{CycleReport, FleetController};
pub use maintenance::MaintenanceController;
