/// # Fleet Errors
/// This module defines the `FleetError` enum, which encapsulates every error the elevator fleet core can report.
/// Each variant is scoped to a single operation; none of them is fatal to the process and all of them leave the fleet state consistent.


use thiserror::Error;
use std::io;
use tokio::sync::mpsc::error::TrySendError;
use crate::models::{ElevatorId, Floor, RequestId, SystemId};

#[derive(Error, Debug)]
pub enum FleetError {
    /// Every elevator is under maintenance, or no elevator has been provisioned.
    #[error("System is not initialized yet or all elevators are under maintenance")]
    NoEligibleElevator,

    /// The chosen elevator changed under a concurrent dispatch more often than the retry budget allows.
    #[error("Dispatch conflict: elevator assignment lost the race {attempts} times")]
    DispatchConflict { attempts: u32 },

    #[error("Cannot move elevator {0}, please close the door first")]
    DoorOpen(ElevatorId),

    #[error("Cannot move elevator {0} as it is under maintenance")]
    UnderMaintenance(ElevatorId),

    /// Riders aboard at the departure floor have not chosen where to go.
    #[error("Some riders in elevator {elevator_id} have not chosen their destination floor, request ids: ({})", join_ids(.request_ids))]
    MissingDestination {
        elevator_id: ElevatorId,
        request_ids: Vec<RequestId>,
    },

    /// Informational: the elevator has been committed as idle before this is raised.
    #[error("There are no pending requests for elevator {0}")]
    NoPendingRequests(ElevatorId),

    #[error("Request {0} is already fulfilled")]
    AlreadyFulfilled(RequestId),

    #[error("Elevator {elevator_id} has not arrived for request {request_id} yet, please wait")]
    ElevatorNotArrived {
        request_id: RequestId,
        elevator_id: ElevatorId,
    },

    #[error("Request {0} has not been assigned to an elevator")]
    UnassignedRequest(RequestId),

    #[error("Pickup floor and destination floor of request {request_id} cannot both be {floor}")]
    SameFloor { request_id: RequestId, floor: Floor },

    #[error("Invalid floor: {0}")]
    InvalidFloor(Floor),

    #[error("Elevator not found: {0}")]
    ElevatorNotFound(ElevatorId),

    #[error("Request not found: {0}")]
    RequestNotFound(RequestId),

    #[error("System not found: {0}")]
    SystemNotFound(SystemId),

    /// Represents errors arising from misconfigurations or invalid settings.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// Represents errors that occur during serialization or deserialization of data.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Represents errors when sending data over a channel.
    #[error("Channel send error: {0}")]
    ChannelSendError(String),

    /// Represents errors when waiting for tasks to complete.
    #[error("Task join error: {0}")]
    TaskJoinError(String),
}

impl FleetError {
    /// `true` for outcomes that report a committed state rather than a rejected operation.
    pub fn is_informational(&self) -> bool {
        matches!(self, FleetError::NoPendingRequests(_))
    }
}

fn join_ids(ids: &[RequestId]) -> String {
    ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(",")
}

impl<T> From<TrySendError<T>> for FleetError {
    fn from(err: TrySendError<T>) -> Self {
        FleetError::ChannelSendError(err.to_string())
    }
}

impl From<config::ConfigError> for FleetError {
    fn from(err: config::ConfigError) -> Self {
        FleetError::ConfigError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for FleetError {
    fn from(err: tokio::task::JoinError) -> Self {
        FleetError::TaskJoinError(err.to_string())
    }
}

pub type FleetResult<T> = Result<T, FleetError>;
