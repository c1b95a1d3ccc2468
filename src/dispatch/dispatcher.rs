use std::sync::Arc;
use tracing::{debug, info, warn};
use crate::dispatch::ranking::{select_elevator, Selection};
use crate::errors::{FleetError, FleetResult};
use crate::models::{
    local_now, ElevatorSummary, ElevatorWokenEvent, FleetEvent, Floor, MovementStatus, Request,
    RequestAssignedEvent, RequestStatus,
};
use crate::repositories::SystemDirectory;
use crate::state_management::event_dispatcher::EventDispatcher;
use crate::state_management::fleet_state_repository::FleetStateRepository;

/// Assigns new rider requests to elevators.
///
/// Selection runs over a snapshot of the whole fleet; the write then happens under the chosen
/// elevator's lock after checking that the elevator has not changed since the snapshot was taken.
/// A stale snapshot causes the selection to be recomputed from scratch, up to `max_retries` times.
///
/// The floor ceiling is read from the `SystemDirectory` after ranking and before the commit lock
/// is taken, so writes made during that lookup surface as a stale revision.
pub struct Dispatcher {
    repository: Arc<FleetStateRepository>,
    systems: Arc<dyn SystemDirectory>,
    event_dispatcher: Arc<EventDispatcher>,
    max_retries: u32,
}

impl Dispatcher {
    pub fn new(
        repository: Arc<FleetStateRepository>,
        systems: Arc<dyn SystemDirectory>,
        event_dispatcher: Arc<EventDispatcher>,
        max_retries: u32,
    ) -> Self {
        Self {
            repository,
            systems,
            event_dispatcher,
            max_retries,
        }
    }

    /// Takes a summary of every elevator at one moment.
    ///
    /// Every elevator lock is taken in id order and held until all summaries are built. No other
    /// path holds more than one elevator lock, so the ordering cannot deadlock.
    pub async fn snapshot(&self) -> Vec<ElevatorSummary> {
        let handles = self.repository.elevator_handles();
        let mut guards = Vec::with_capacity(handles.len());
        for (_, handle) in &handles {
            guards.push(handle.lock().await);
        }
        guards
            .iter()
            .map(|elevator| {
                let load = self.repository.active_or_boarded_count(elevator.id);
                ElevatorSummary::from_elevator(elevator, load)
            })
            .collect()
    }

    /// Creates a request at `pickup_floor` and assigns it to the best elevator.
    ///
    /// If the chosen elevator is idle somewhere else, it is woken towards the pickup floor. If it
    /// is already at the pickup floor the request is created Boarded.
    ///
    /// # Returns
    ///
    /// * `Ok(Request)` the created request, with its elevator set
    /// * `Err(FleetError::InvalidFloor)` for a negative pickup floor
    /// * `Err(FleetError::NoEligibleElevator)` if no elevator can serve the request
    /// * `Err(FleetError::DispatchConflict)` if every attempt lost its elevator to a concurrent write
    pub async fn assign(&self, pickup_floor: Floor) -> FleetResult<Request> {
        if pickup_floor < 0 {
            return Err(FleetError::InvalidFloor(pickup_floor));
        }

        let attempts = self.max_retries + 1;
        for attempt in 1..=attempts {
            let snapshot = self.snapshot().await;
            let selection = select_elevator(&snapshot, pickup_floor)?;
            let summary = snapshot
                .iter()
                .find(|summary| summary.id == selection.elevator_id)
                .ok_or(FleetError::ElevatorNotFound(selection.elevator_id))?;
            let max_floors = self.systems.max_floors(summary.system_id).await?;

            match self.try_commit(summary, selection, pickup_floor, max_floors).await? {
                Some(request) => return Ok(request),
                None => debug!(
                    "Elevator {} changed before assignment (attempt {}/{}), re-ranking",
                    selection.elevator_id, attempt, attempts
                ),
            }
        }

        warn!("Giving up on pickup at floor {} after {} attempts", pickup_floor, attempts);
        Err(FleetError::DispatchConflict { attempts })
    }

    /// Applies the assignment if the elevator still matches the snapshot it was ranked on.
    ///
    /// Returns `Ok(None)` when the snapshot went stale.
    async fn try_commit(
        &self,
        summary: &ElevatorSummary,
        selection: Selection,
        pickup_floor: Floor,
        max_floors: Floor,
    ) -> FleetResult<Option<Request>> {
        let handle = self.repository.elevator_handle(summary.id)?;
        let mut elevator = handle.lock().await;
        if elevator.under_maintenance || elevator.revision != summary.revision {
            return Ok(None);
        }

        let timestamp = local_now();
        let mut events = Vec::new();
        let already_there = elevator.current_floor == pickup_floor;

        if elevator.is_idle() && !already_there {
            elevator.movement_status = if pickup_floor >= elevator.current_floor && pickup_floor < max_floors {
                MovementStatus::GoingUp
            } else {
                MovementStatus::GoingDown
            };
            elevator.next_floor = Some(pickup_floor);
            events.push(FleetEvent::ElevatorWoken(ElevatorWokenEvent {
                elevator_id: elevator.id,
                direction: elevator.movement_status,
                next_floor: pickup_floor,
                timestamp,
            }));
        }

        let mut request = Request::new(self.repository.next_request_id(), pickup_floor);
        request.elevator_id = Some(elevator.id);
        if already_there {
            request.status = RequestStatus::Boarded;
        }
        self.repository.insert_request(request.clone());
        elevator.touch();
        drop(elevator);

        info!(
            "Assigned request {} (pickup floor {}) to elevator {} by rule {}, status {}",
            request.id, pickup_floor, summary.id, selection.rule, request.status
        );
        events.push(FleetEvent::RequestAssigned(RequestAssignedEvent {
            request_id: request.id,
            elevator_id: summary.id,
            pickup_floor,
            status: request.status,
            timestamp,
        }));
        self.event_dispatcher.dispatch_events(events);

        Ok(Some(request))
    }
}
