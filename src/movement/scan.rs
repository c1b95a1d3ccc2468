//! # Directional Scan

//! The single rule deciding an elevator's next stop. It is shared by the pre-move computation,
//! the post-move recomputation and the read-only next-floor preview.

use crate::models::{Floor, MovementStatus, Request};
use crate::movement::landmarks::Landmarks;

/// Computes the next floor to visit.
///
/// * `Idle` compares the nearest pickups above and below, or the nearest drop-offs above and
///   below as soon as any drop-off exists.
/// * `GoingUp` keeps going up while anything remains above, choosing the nearer of the pickup and
///   drop-off above. Otherwise it turns around and does the same below.
/// * `GoingDown` mirrors `GoingUp`.
///
/// Distance ties go to the pickup (or, when idle, to the floor above).
/// Returns `None` only when there are no landmarks at all.
pub fn compute_next_stop(landmarks: &Landmarks, direction: MovementStatus, current_floor: Floor) -> Option<Floor> {
    let nearer = |preferred, other| nearer_of(current_floor, preferred, other);
    match direction {
        MovementStatus::Idle if !landmarks.has_dropoffs() => nearer(landmarks.pickup_above, landmarks.pickup_below),
        MovementStatus::Idle => nearer(landmarks.dropoff_above, landmarks.dropoff_below),
        MovementStatus::GoingUp if !landmarks.anything_above() => nearer(landmarks.pickup_below, landmarks.dropoff_below),
        MovementStatus::GoingUp => nearer(landmarks.pickup_above, landmarks.dropoff_above),
        MovementStatus::GoingDown if !landmarks.anything_below() => nearer(landmarks.pickup_above, landmarks.dropoff_above),
        MovementStatus::GoingDown => nearer(landmarks.pickup_below, landmarks.dropoff_below),
    }
}

/// Extracts the landmarks of `requests` and applies [`compute_next_stop`].
pub fn next_stop_for<'a>(
    requests: impl IntoIterator<Item = &'a Request>,
    direction: MovementStatus,
    current_floor: Floor,
) -> Option<Floor> {
    compute_next_stop(&Landmarks::from_requests(requests, current_floor), direction, current_floor)
}

fn nearer_of(current_floor: Floor, preferred: Option<Floor>, other: Option<Floor>) -> Option<Floor> {
    match (preferred, other) {
        (Some(preferred), Some(other)) => {
            if (preferred - current_floor).abs() <= (other - current_floor).abs() {
                Some(preferred)
            } else {
                Some(other)
            }
        }
        (preferred, other) => preferred.or(other),
    }
}
