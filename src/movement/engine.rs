//! # Movement Engine

//! Moves one elevator by exactly one committed stop. The step itself is a pure function over the
//! elevator and its pending requests ([`apply_step`]); [`MovementEngine`] wraps it with the
//! elevator lock, the persistence of changed requests and event publication.

use std::sync::Arc;
use chrono::NaiveDateTime;
use tracing::{debug, info, warn};
use crate::errors::{FleetError, FleetResult};
use crate::models::{
    local_now, DoorStatus, Elevator, ElevatorId, ElevatorIdledEvent, ElevatorMovedEvent, FleetEvent, Floor,
    MovementStatus, Request, RequestId, RiderEvent,
};
use crate::movement::landmarks::Landmarks;
use crate::movement::scan::{compute_next_stop, next_stop_for};
use crate::state_management::event_dispatcher::EventDispatcher;
use crate::state_management::fleet_state_repository::FleetStateRepository;

/// What a single step did to an elevator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// No Active or Boarded request remained; the elevator was parked.
    NothingPending,
    /// Requests remain but none gives a stop away from the current floor. The elevator was parked
    /// and riders waiting at its floor boarded.
    Parked { boarded: Vec<RequestId> },
    Moved {
        from_floor: Floor,
        to_floor: Floor,
        boarded: Vec<RequestId>,
        fulfilled: Vec<RequestId>,
    },
}

impl StepOutcome {
    /// Events describing the outcome, given the elevator state after the step.
    pub fn events(&self, elevator: &Elevator, timestamp: NaiveDateTime) -> Vec<FleetEvent> {
        let rider = |request_id: &RequestId| RiderEvent {
            request_id: *request_id,
            elevator_id: elevator.id,
            floor: elevator.current_floor,
            timestamp,
        };
        let idled = FleetEvent::ElevatorIdled(ElevatorIdledEvent {
            elevator_id: elevator.id,
            floor: elevator.current_floor,
            timestamp,
        });

        match self {
            StepOutcome::NothingPending => vec![idled],
            StepOutcome::Parked { boarded } => boarded
                .iter()
                .map(|id| FleetEvent::RiderBoarded(rider(id)))
                .chain(std::iter::once(idled))
                .collect(),
            StepOutcome::Moved { from_floor, to_floor, boarded, fulfilled } => {
                let moved = FleetEvent::ElevatorMoved(ElevatorMovedEvent {
                    elevator_id: elevator.id,
                    from_floor: *from_floor,
                    to_floor: *to_floor,
                    direction: elevator.movement_status,
                    next_floor: elevator.next_floor,
                    timestamp,
                });
                std::iter::once(moved)
                    .chain(boarded.iter().map(|id| FleetEvent::RiderBoarded(rider(id))))
                    .chain(fulfilled.iter().map(|id| FleetEvent::RequestFulfilled(rider(id))))
                    .collect()
            }
        }
    }
}

/// Checks that the elevator may move at all.
///
/// `requests` are the elevator's pending requests. Riders aboard at the departure floor must have
/// chosen a destination.
pub fn ensure_movable(elevator: &Elevator, requests: &[Request]) -> FleetResult<()> {
    if elevator.door_status == DoorStatus::Open {
        return Err(FleetError::DoorOpen(elevator.id));
    }
    if elevator.under_maintenance {
        return Err(FleetError::UnderMaintenance(elevator.id));
    }
    let request_ids: Vec<RequestId> = requests
        .iter()
        .filter(|r| r.is_boarded() && r.pickup_floor == elevator.current_floor && r.destination_floor.is_none())
        .map(|r| r.id)
        .collect();
    if !request_ids.is_empty() {
        return Err(FleetError::MissingDestination {
            elevator_id: elevator.id,
            request_ids,
        });
    }
    Ok(())
}

/// Performs one step on an elevator that passed [`ensure_movable`].
///
/// `requests` must be exactly the elevator's Active and Boarded requests. They are updated in
/// place; the caller persists them together with the elevator.
pub fn apply_step(elevator: &mut Elevator, requests: &mut [Request]) -> StepOutcome {
    if requests.is_empty() {
        elevator.park();
        return StepOutcome::NothingPending;
    }

    let direction = elevator.movement_status;
    let from_floor = elevator.current_floor;
    let landmarks = Landmarks::from_requests(requests.iter(), from_floor);

    let Some(to_floor) = compute_next_stop(&landmarks, direction, from_floor) else {
        elevator.park();
        let boarded = board_at(requests, |floor| floor == from_floor);
        return StepOutcome::Parked { boarded };
    };

    elevator.movement_status = if to_floor > from_floor {
        MovementStatus::GoingUp
    } else {
        MovementStatus::GoingDown
    };
    elevator.current_floor = to_floor;

    let boarded = board_at(requests, |floor| floor == to_floor || floor == from_floor);
    let fulfilled: Vec<RequestId> = requests
        .iter_mut()
        .filter(|r| r.destination_floor == Some(to_floor))
        .filter_map(|r| r.deliver().then_some(r.id))
        .collect();

    let following = next_stop_for(requests.iter(), direction, to_floor);
    elevator.next_floor = following.filter(|&floor| floor != to_floor);

    StepOutcome::Moved {
        from_floor,
        to_floor,
        boarded,
        fulfilled,
    }
}

fn board_at(requests: &mut [Request], at: impl Fn(Floor) -> bool) -> Vec<RequestId> {
    requests
        .iter_mut()
        .filter(|r| at(r.pickup_floor))
        .filter_map(|r| r.board().then_some(r.id))
        .collect()
}

/// Runs movement steps against the shared fleet state.
pub struct MovementEngine {
    repository: Arc<FleetStateRepository>,
    event_dispatcher: Arc<EventDispatcher>,
}

impl MovementEngine {
    pub fn new(repository: Arc<FleetStateRepository>, event_dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            repository,
            event_dispatcher,
        }
    }

    /// Moves the elevator by one stop.
    ///
    /// # Returns
    ///
    /// * `Ok(Elevator)` the committed elevator state
    /// * `Err(FleetError::DoorOpen | UnderMaintenance | MissingDestination)` with nothing changed
    /// * `Err(FleetError::NoPendingRequests)` after the elevator has been committed as idle
    pub async fn advance(&self, elevator_id: ElevatorId) -> FleetResult<Elevator> {
        let handle = self.repository.elevator_handle(elevator_id)?;
        let mut elevator = handle.lock().await;
        let mut requests = self.repository.pending_requests_for(elevator_id);

        if let Err(e) = ensure_movable(&elevator, &requests) {
            warn!("Elevator {} cannot move: {}", elevator_id, e);
            return Err(e);
        }

        let outcome = apply_step(&mut elevator, &mut requests);
        elevator.touch();
        self.repository.store_requests(requests);
        let committed = elevator.clone();
        drop(elevator);

        match &outcome {
            StepOutcome::NothingPending => debug!("Elevator {} has no pending requests, idling at floor {}", elevator_id, committed.current_floor),
            StepOutcome::Parked { boarded } => warn!(
                "Elevator {} has pending requests but no stop to go to, idling at floor {} ({} boarded)",
                elevator_id, committed.current_floor, boarded.len()
            ),
            StepOutcome::Moved { from_floor, to_floor, boarded, fulfilled } => info!(
                "Elevator {} moved {} from floor {} to {}: {} boarded, {} fulfilled, next stop {:?}",
                elevator_id, committed.movement_status, from_floor, to_floor, boarded.len(), fulfilled.len(), committed.next_floor
            ),
        }
        self.event_dispatcher.dispatch_events(outcome.events(&committed, local_now()));

        match outcome {
            StepOutcome::NothingPending => Err(FleetError::NoPendingRequests(elevator_id)),
            _ => Ok(committed),
        }
    }

    /// Previews the stop the next [`advance`](Self::advance) would head to, without changing anything.
    ///
    /// Returns `None` for an elevator under maintenance or with nothing to do.
    pub async fn preview_next_floor(&self, elevator_id: ElevatorId) -> FleetResult<Option<Floor>> {
        let handle = self.repository.elevator_handle(elevator_id)?;
        let elevator = handle.lock().await;
        if elevator.under_maintenance {
            return Ok(None);
        }
        let requests = self.repository.pending_requests_for(elevator_id);
        Ok(next_stop_for(requests.iter(), elevator.movement_status, elevator.current_floor))
    }
}
