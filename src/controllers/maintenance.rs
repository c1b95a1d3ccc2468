use std::sync::Arc;
use tracing::info;
use crate::errors::FleetResult;
use crate::models::{local_now, DoorStatus, Elevator, ElevatorId, FleetEvent, MaintenanceEnteredEvent, RequestId};
use crate::state_management::event_dispatcher::EventDispatcher;
use crate::state_management::fleet_state_repository::FleetStateRepository;

/// Takes elevators out of service
pub struct MaintenanceController {
    repository: Arc<FleetStateRepository>,
    event_dispatcher: Arc<EventDispatcher>,
}

impl MaintenanceController {
    pub fn new(repository: Arc<FleetStateRepository>, event_dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            repository,
            event_dispatcher,
        }
    }

    /// Puts an elevator under maintenance
    ///
    /// The elevator is reset to the ground floor, parked with its door closed, and every Active or
    /// Boarded request it holds is cancelled by moving it to Fulfilled. Riders have to submit a new
    /// request. Calling this again on an elevator already under maintenance changes nothing further
    ///
    /// # Returns
    ///
    /// * `Ok(Elevator)` the committed elevator state
    /// * `Err(FleetError::ElevatorNotFound)` for an unknown elevator
    pub async fn enter_maintenance(&self, elevator_id: ElevatorId) -> FleetResult<Elevator> {
        let handle = self.repository.elevator_handle(elevator_id)?;
        let mut elevator = handle.lock().await;

        elevator.under_maintenance = true;
        elevator.current_floor = 0;
        elevator.door_status = DoorStatus::Closed;
        elevator.park();

        let mut requests = self.repository.pending_requests_for(elevator_id);
        let evicted_requests: Vec<RequestId> = requests
            .iter_mut()
            .filter_map(|request| request.evict().then_some(request.id))
            .collect();
        self.repository.store_requests(requests);
        elevator.touch();
        let committed = elevator.clone();
        drop(elevator);

        info!("Elevator {} is under maintenance, {} requests evicted", elevator_id, evicted_requests.len());
        let _ = self.event_dispatcher.dispatch_event(FleetEvent::MaintenanceEntered(MaintenanceEnteredEvent {
            elevator_id,
            evicted_requests,
            timestamp: local_now(),
        }));

        Ok(committed)
    }
}
