pub mod state_manager;
pub mod fleet_state_repository;
pub mod event_dispatcher;
pub mod state_manager_lifecycle;

pub use state_manager::FleetStateManager;
pub use fleet_state_repository::{ElevatorHandle, FleetStateRepository};
