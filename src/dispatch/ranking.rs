//! # Elevator Ranking

//! Pure selection of the elevator that should serve a pickup floor, evaluated over a snapshot of
//! elevator summaries. The rules are applied in strict priority order and the first one that
//! produces a candidate wins:
//!
//! 1. an elevator already at the pickup floor, least loaded first
//! 2. the nearest idle elevator
//! 3. the nearest elevator converging on the pickup floor, from below while rising or from above
//!    while descending
//!
//! Elevators under maintenance are never considered.

use derive_more::{Constructor, Display};
use crate::errors::{FleetError, FleetResult};
use crate::models::{ElevatorId, ElevatorSummary, Floor, MovementStatus};

/// The rule that produced a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DispatchRule {
    AlreadyThere,
    NearestIdle,
    ConvergingFromBelow,
    ConvergingFromAbove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Constructor)]
pub struct Selection {
    pub elevator_id: ElevatorId,
    pub rule: DispatchRule,
}

/// Selects the elevator that should serve `pickup_floor`.
///
/// Ties are broken by the lowest elevator id so that the same snapshot always yields the same
/// selection.
///
/// # Returns
///
/// * `Ok(Selection)` naming the elevator and the rule that chose it
/// * `Err(FleetError::NoEligibleElevator)` if the fleet is empty, fully under maintenance, or no
///   elevator satisfies any rule
pub fn select_elevator(fleet: &[ElevatorSummary], pickup_floor: Floor) -> FleetResult<Selection> {
    let eligible: Vec<&ElevatorSummary> = fleet.iter().filter(|e| !e.under_maintenance).collect();
    if eligible.is_empty() {
        return Err(FleetError::NoEligibleElevator);
    }

    if let Some(elevator) = eligible
        .iter()
        .filter(|e| e.current_floor == pickup_floor)
        .min_by_key(|e| (e.active_or_boarded_count, e.id))
    {
        return Ok(Selection::new(elevator.id, DispatchRule::AlreadyThere));
    }

    if let Some(elevator) = eligible
        .iter()
        .filter(|e| e.movement_status == MovementStatus::Idle)
        .min_by_key(|e| (e.floor_distance(pickup_floor), e.id))
    {
        return Ok(Selection::new(elevator.id, DispatchRule::NearestIdle));
    }

    let below = nearest(
        eligible
            .iter()
            .copied()
            .filter(|e| e.current_floor < pickup_floor && e.next_floor.map_or(true, |next| next >= pickup_floor)),
        pickup_floor,
    );
    let above = nearest(
        eligible
            .iter()
            .copied()
            .filter(|e| e.current_floor > pickup_floor && e.next_floor.map_or(true, |next| next <= pickup_floor)),
        pickup_floor,
    );

    match (below, above) {
        (Some(below), Some(above)) => {
            let below_distance = below.floor_distance(pickup_floor);
            let above_distance = above.floor_distance(pickup_floor);
            // Equal distances fall back to load, with the rising elevator winning a load tie.
            let prefer_below = if below_distance == above_distance {
                below.active_or_boarded_count <= above.active_or_boarded_count
            } else {
                below_distance < above_distance
            };
            Ok(if prefer_below {
                Selection::new(below.id, DispatchRule::ConvergingFromBelow)
            } else {
                Selection::new(above.id, DispatchRule::ConvergingFromAbove)
            })
        }
        (Some(below), None) => Ok(Selection::new(below.id, DispatchRule::ConvergingFromBelow)),
        (None, Some(above)) => Ok(Selection::new(above.id, DispatchRule::ConvergingFromAbove)),
        (None, None) => Err(FleetError::NoEligibleElevator),
    }
}

fn nearest<'a>(
    candidates: impl Iterator<Item = &'a ElevatorSummary>,
    pickup_floor: Floor,
) -> Option<&'a ElevatorSummary> {
    candidates.min_by_key(|e| (e.floor_distance(pickup_floor), e.active_or_boarded_count, e.id))
}
