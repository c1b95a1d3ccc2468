#![allow(dead_code)]

use std::sync::Arc;
use tokio::sync::mpsc::Receiver;
use elevator_fleet::config::{
    DispatchSettings, EventSettings, FleetSettings, LoggingSettings, RiderSettings, Settings, SimulationSettings,
    SystemSettings,
};
use elevator_fleet::models::{Elevator, ElevatorId, FleetEvent, Floor, MovementStatus};
use elevator_fleet::repositories::SystemRepository;
use elevator_fleet::state_management::FleetStateManager;

pub fn create_mock_settings(elevators_count: u32, max_floors: Floor) -> Settings {
    Settings {
        logging: LoggingSettings {
            level: "info".to_string(),
            path: None,
        },
        fleet: FleetSettings {
            systems: vec![SystemSettings {
                name: "Test Tower".to_string(),
                elevators_count,
                max_floors,
            }],
        },
        dispatch: DispatchSettings { max_retries: 5 },
        events: EventSettings { channel_capacity: 1000 },
        simulation: SimulationSettings {
            step_interval_ms: 10,
            max_steps: 50,
            riders: vec![],
        },
    }
}

pub fn rider(pickup_floor: Floor, destination_floor: Floor) -> RiderSettings {
    RiderSettings { pickup_floor, destination_floor }
}

pub struct TestFleet {
    pub settings: Settings,
    pub systems: Arc<SystemRepository>,
    pub state_manager: FleetStateManager,
    pub events: Receiver<FleetEvent>,
    pub elevator_ids: Vec<ElevatorId>,
}

impl TestFleet {
    pub fn elevator(&self, index: usize) -> ElevatorId {
        self.elevator_ids[index]
    }

    /// Rewrites an elevator's state in place, bypassing every operation
    pub async fn set_elevator(&self, elevator_id: ElevatorId, update: impl FnOnce(&mut Elevator)) {
        let handle = self.state_manager.get_repository().elevator_handle(elevator_id).unwrap();
        let mut elevator = handle.lock().await;
        update(&mut *elevator);
    }

    pub async fn place_idle(&self, elevator_id: ElevatorId, floor: Floor) {
        self.set_elevator(elevator_id, |e| {
            e.current_floor = floor;
            e.park();
        })
        .await;
    }

    pub async fn place_moving(&self, elevator_id: ElevatorId, floor: Floor, direction: MovementStatus, next_floor: Option<Floor>) {
        self.set_elevator(elevator_id, |e| {
            e.current_floor = floor;
            e.movement_status = direction;
            e.next_floor = next_floor;
        })
        .await;
    }
}

pub fn build_fleet_with(settings: Settings) -> TestFleet {
    let systems = Arc::new(SystemRepository::new());
    let provisioned = systems.register_from_settings(&settings).unwrap();
    let (state_manager, events) = FleetStateManager::new(&settings, systems.clone());
    let elevator_ids = provisioned
        .iter()
        .flat_map(|system| state_manager.install_system(system))
        .collect();

    TestFleet {
        settings,
        systems,
        state_manager,
        events,
        elevator_ids,
    }
}

pub fn build_fleet(elevators_count: u32, max_floors: Floor) -> TestFleet {
    build_fleet_with(create_mock_settings(elevators_count, max_floors))
}

/// Checks the elevator invariants that must hold after every operation
pub fn assert_invariants(elevator: &Elevator) {
    if elevator.is_idle() {
        assert_eq!(elevator.next_floor, None, "idle elevator {} has a next floor", elevator.id);
    }
    if elevator.under_maintenance {
        assert!(elevator.is_idle());
        assert_eq!(elevator.next_floor, None);
        assert_eq!(elevator.door_status, elevator_fleet::models::DoorStatus::Closed);
    }
    assert!(elevator.current_floor >= 0);
}
