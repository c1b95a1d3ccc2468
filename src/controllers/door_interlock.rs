use std::sync::Arc;
use tracing::info;
use crate::errors::FleetResult;
use crate::models::{local_now, DoorToggledEvent, Elevator, ElevatorId, FleetEvent};
use crate::state_management::event_dispatcher::EventDispatcher;
use crate::state_management::fleet_state_repository::FleetStateRepository;

/// Opens and closes elevator doors. An open door blocks movement.
pub struct DoorInterlock {
    repository: Arc<FleetStateRepository>,
    event_dispatcher: Arc<EventDispatcher>,
}

impl DoorInterlock {
    pub fn new(repository: Arc<FleetStateRepository>, event_dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            repository,
            event_dispatcher,
        }
    }

    /// Flips the door between Open and Closed. Nothing else about the elevator changes.
    pub async fn toggle_door(&self, elevator_id: ElevatorId) -> FleetResult<Elevator> {
        let handle = self.repository.elevator_handle(elevator_id)?;
        let mut elevator = handle.lock().await;
        elevator.door_status = elevator.door_status.toggled();
        elevator.touch();
        let committed = elevator.clone();
        drop(elevator);

        info!("Elevator {} door is now {}", elevator_id, committed.door_status);
        let _ = self.event_dispatcher.dispatch_event(FleetEvent::DoorToggled(DoorToggledEvent {
            elevator_id,
            door_status: committed.door_status,
            timestamp: local_now(),
        }));

        Ok(committed)
    }
}
