//! # Fleet Event Definitions

//! This module defines the `FleetEvent` enum and its associated structs, one per committed mutation of the fleet state.
//! Events are published after the mutation is applied so that consumers only ever observe consistent state.


use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::models::istates::{DoorStatus, MovementStatus, RequestStatus};
use crate::models::{ElevatorId, Floor, RequestId};

/// Represents the different types of events that can occur in the fleet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FleetEvent {
    /// A new request was assigned to an elevator
    RequestAssigned(RequestAssignedEvent),
    /// An idle elevator was given a direction and a first stop by the dispatcher
    ElevatorWoken(ElevatorWokenEvent),
    /// An elevator moved from one floor to another
    ElevatorMoved(ElevatorMovedEvent),
    /// A rider boarded an elevator
    RiderBoarded(RiderEvent),
    /// A rider was delivered to their destination
    RequestFulfilled(RiderEvent),
    /// An elevator ran out of work and parked
    ElevatorIdled(ElevatorIdledEvent),
    /// A rider chose their destination floor
    DestinationSet(DestinationSetEvent),
    /// An elevator door was opened or closed
    DoorToggled(DoorToggledEvent),
    /// An elevator was taken out of service and its riders evicted
    MaintenanceEntered(MaintenanceEnteredEvent),
}

impl FleetEvent {
    /// Retrieves the elevator associated with the event
    pub fn elevator_id(&self) -> ElevatorId {
        match self {
            FleetEvent::RequestAssigned(e) => e.elevator_id,
            FleetEvent::ElevatorWoken(e) => e.elevator_id,
            FleetEvent::ElevatorMoved(e) => e.elevator_id,
            FleetEvent::RiderBoarded(e) => e.elevator_id,
            FleetEvent::RequestFulfilled(e) => e.elevator_id,
            FleetEvent::ElevatorIdled(e) => e.elevator_id,
            FleetEvent::DestinationSet(e) => e.elevator_id,
            FleetEvent::DoorToggled(e) => e.elevator_id,
            FleetEvent::MaintenanceEntered(e) => e.elevator_id,
        }
    }

    /// Retrieves the timestamp of the event
    pub fn timestamp(&self) -> NaiveDateTime {
        match self {
            FleetEvent::RequestAssigned(e) => e.timestamp,
            FleetEvent::ElevatorWoken(e) => e.timestamp,
            FleetEvent::ElevatorMoved(e) => e.timestamp,
            FleetEvent::RiderBoarded(e) => e.timestamp,
            FleetEvent::RequestFulfilled(e) => e.timestamp,
            FleetEvent::ElevatorIdled(e) => e.timestamp,
            FleetEvent::DestinationSet(e) => e.timestamp,
            FleetEvent::DoorToggled(e) => e.timestamp,
            FleetEvent::MaintenanceEntered(e) => e.timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestAssignedEvent {
    pub request_id: RequestId,
    pub elevator_id: ElevatorId,
    pub pickup_floor: Floor,
    /// `Boarded` when the elevator was already waiting at the pickup floor.
    pub status: RequestStatus,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElevatorWokenEvent {
    pub elevator_id: ElevatorId,
    pub direction: MovementStatus,
    pub next_floor: Floor,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElevatorMovedEvent {
    pub elevator_id: ElevatorId,
    pub from_floor: Floor,
    pub to_floor: Floor,
    pub direction: MovementStatus,
    /// The stop committed after this move, if there is one.
    pub next_floor: Option<Floor>,
    pub timestamp: NaiveDateTime,
}

/// Shared payload for boarding and delivery events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiderEvent {
    pub request_id: RequestId,
    pub elevator_id: ElevatorId,
    pub floor: Floor,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElevatorIdledEvent {
    pub elevator_id: ElevatorId,
    pub floor: Floor,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationSetEvent {
    pub request_id: RequestId,
    pub elevator_id: ElevatorId,
    pub destination_floor: Floor,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorToggledEvent {
    pub elevator_id: ElevatorId,
    pub door_status: DoorStatus,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceEnteredEvent {
    pub elevator_id: ElevatorId,
    /// Requests that were cancelled by the eviction.
    pub evicted_requests: Vec<RequestId>,
    pub timestamp: NaiveDateTime,
}
