//! # Fleet State Enums

//! This module defines the closed sets of states an elevator, its door and a rider request can be in.
//! Each enum replaces a free-form status label with a tagged variant so that invalid states cannot be represented.

use serde::{Deserialize, Serialize};
use derive_more::{Display, FromStr};

/// Represents the direction policy an elevator is currently following.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Serialize, Deserialize, FromStr, Display, Default)]
pub enum MovementStatus {
    /// The elevator has no committed destination.
    #[default]
    Idle,
    /// The elevator last moved, or was woken, towards a higher floor.
    GoingUp,
    /// The elevator last moved, or was woken, towards a lower floor.
    GoingDown,
}

/// Represents the position of the elevator door.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Serialize, Deserialize, FromStr, Display, Default)]
pub enum DoorStatus {
    /// The door is open; the elevator cannot move.
    Open,
    /// The door is closed.
    #[default]
    Closed,
}

impl DoorStatus {
    /// Returns the opposite door position.
    pub fn toggled(self) -> Self {
        match self {
            DoorStatus::Open => DoorStatus::Closed,
            DoorStatus::Closed => DoorStatus::Open,
        }
    }
}

/// Represents where a rider request is in its lifecycle.
///
/// Statuses only move forward: `Active` -> `Boarded` -> `Fulfilled`.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Serialize, Deserialize, FromStr, Display, Default)]
pub enum RequestStatus {
    /// The rider is waiting at the pickup floor.
    #[default]
    Active,
    /// The rider is inside the assigned elevator.
    Boarded,
    /// Terminal. The rider was delivered, or the request was cancelled by maintenance.
    Fulfilled,
}

impl RequestStatus {
    /// `true` while the request still counts as work for its elevator.
    pub fn is_pending(self) -> bool {
        matches!(self, RequestStatus::Active | RequestStatus::Boarded)
    }
}
