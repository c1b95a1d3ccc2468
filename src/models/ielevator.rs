//! # Elevator Representation

//! This module defines the `Elevator` struct, the mutable record of one car in a fleet, and the
//! `ElevatorSummary` read model the dispatcher ranks.

use serde::{Deserialize, Serialize};
use crate::models::istates::{DoorStatus, MovementStatus};
use crate::models::{ElevatorId, Floor, SystemId};

/// Represents the state of a single elevator.
///
/// Invariants maintained by every operation:
/// * an idle elevator has no `next_floor`
/// * an elevator under maintenance is idle, has no `next_floor` and its door is closed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elevator {
    /// The unique identifier of the elevator.
    pub id: ElevatorId,
    /// The system (fleet) that owns the elevator.
    pub system_id: SystemId,
    /// The floor the elevator is currently stopped at.
    pub current_floor: Floor,
    /// The committed next stop, if any.
    pub next_floor: Option<Floor>,
    /// Whether the elevator has been taken out of service.
    pub under_maintenance: bool,
    /// The current position of the door.
    pub door_status: DoorStatus,
    /// The direction policy the elevator is following.
    pub movement_status: MovementStatus,
    /// Incremented on every committed mutation, including new assignments.
    /// Used to detect that a dispatch snapshot went stale.
    pub revision: u64,
}

impl Elevator {
    /// Creates an idle elevator at the ground floor with its door closed.
    pub fn new(id: ElevatorId, system_id: SystemId) -> Self {
        Self {
            id,
            system_id,
            current_floor: 0,
            next_floor: None,
            under_maintenance: false,
            door_status: DoorStatus::Closed,
            movement_status: MovementStatus::Idle,
            revision: 0,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.movement_status == MovementStatus::Idle
    }

    /// Clears the committed destination and parks the elevator in place.
    pub fn park(&mut self) {
        self.next_floor = None;
        self.movement_status = MovementStatus::Idle;
    }

    /// Records that the elevator state was committed.
    pub fn touch(&mut self) {
        self.revision += 1;
    }
}

/// A point-in-time view of an elevator, annotated with the figures the dispatcher ranks on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElevatorSummary {
    pub id: ElevatorId,
    pub system_id: SystemId,
    pub current_floor: Floor,
    pub next_floor: Option<Floor>,
    pub movement_status: MovementStatus,
    pub under_maintenance: bool,
    /// Number of requests assigned to the elevator that are still Active or Boarded.
    pub active_or_boarded_count: usize,
    /// The revision the summary was taken at.
    pub revision: u64,
}

impl ElevatorSummary {
    pub fn from_elevator(elevator: &Elevator, active_or_boarded_count: usize) -> Self {
        Self {
            id: elevator.id,
            system_id: elevator.system_id,
            current_floor: elevator.current_floor,
            next_floor: elevator.next_floor,
            movement_status: elevator.movement_status,
            under_maintenance: elevator.under_maintenance,
            active_or_boarded_count,
            revision: elevator.revision,
        }
    }

    /// Absolute number of floors between the elevator and `floor`.
    pub fn floor_distance(&self, floor: Floor) -> Floor {
        (self.current_floor - floor).abs()
    }
}
