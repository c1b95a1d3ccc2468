use std::sync::Arc;
use tracing::{info, warn};
use crate::errors::{FleetError, FleetResult};
use crate::models::{local_now, DestinationSetEvent, FleetEvent, Floor, Request, RequestId, RequestStatus};
use crate::state_management::event_dispatcher::EventDispatcher;
use crate::state_management::fleet_state_repository::FleetStateRepository;

/// Records the floor a rider wants to reach, once their elevator has come to pick them up
pub struct DestinationController {
    repository: Arc<FleetStateRepository>,
    event_dispatcher: Arc<EventDispatcher>,
}

impl DestinationController {
    pub fn new(repository: Arc<FleetStateRepository>, event_dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            repository,
            event_dispatcher,
        }
    }

    /// Sets the destination floor of a request
    ///
    /// The request is validated under its elevator's lock, so the elevator cannot move away from the
    /// pickup floor while the destination is being recorded
    ///
    /// # Returns
    ///
    /// * `Ok(Request)` the updated request
    /// * `Err(FleetError::AlreadyFulfilled)` if the request is finished
    /// * `Err(FleetError::ElevatorNotArrived)` if its elevator is not at the pickup floor
    /// * `Err(FleetError::SameFloor)` if the destination equals the pickup floor
    /// * `Err(FleetError::InvalidFloor)` for a negative floor
    pub async fn set_destination(&self, request_id: RequestId, destination_floor: Floor) -> FleetResult<Request> {
        if destination_floor < 0 {
            return Err(FleetError::InvalidFloor(destination_floor));
        }

        let request = self.repository.get_request(request_id)?;
        if request.status == RequestStatus::Fulfilled {
            return Err(FleetError::AlreadyFulfilled(request_id));
        }
        let elevator_id = request.elevator_id.ok_or(FleetError::UnassignedRequest(request_id))?;

        let handle = self.repository.elevator_handle(elevator_id)?;
        let elevator = handle.lock().await;

        // Maintenance may have evicted the request while we waited for the lock.
        let mut request = self.repository.get_request(request_id)?;
        if request.status == RequestStatus::Fulfilled {
            return Err(FleetError::AlreadyFulfilled(request_id));
        }
        if elevator.current_floor != request.pickup_floor {
            warn!(
                "Destination for request {} rejected: elevator {} is at floor {}, pickup is {}",
                request_id, elevator_id, elevator.current_floor, request.pickup_floor
            );
            return Err(FleetError::ElevatorNotArrived { request_id, elevator_id });
        }
        if destination_floor == request.pickup_floor {
            return Err(FleetError::SameFloor { request_id, floor: destination_floor });
        }

        request.destination_floor = Some(destination_floor);
        self.repository.insert_request(request.clone());
        drop(elevator);

        info!("Request {} heading to floor {} in elevator {}", request_id, destination_floor, elevator_id);
        let _ = self.event_dispatcher.dispatch_event(FleetEvent::DestinationSet(DestinationSetEvent {
            request_id,
            elevator_id,
            destination_floor,
            timestamp: local_now(),
        }));

        Ok(request)
    }
}
