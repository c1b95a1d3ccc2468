//! # Rider Requests

//! A `Request` is one rider's journey: created at a pickup floor, assigned to an elevator by the
//! dispatcher, boarded on arrival and fulfilled at the destination.

use serde::{Deserialize, Serialize};
use crate::models::istates::RequestStatus;
use crate::models::{ElevatorId, Floor, RequestId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// The unique identifier of the request.
    pub id: RequestId,
    /// The floor the rider is waiting at.
    pub pickup_floor: Floor,
    /// The floor the rider wants to reach. Chosen once the elevator has arrived at the pickup floor.
    pub destination_floor: Option<Floor>,
    /// The elevator serving this request.
    pub elevator_id: Option<ElevatorId>,
    pub status: RequestStatus,
}

impl Request {
    pub fn new(id: RequestId, pickup_floor: Floor) -> Self {
        Self {
            id,
            pickup_floor,
            destination_floor: None,
            elevator_id: None,
            status: RequestStatus::Active,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    pub fn is_active(&self) -> bool {
        self.status == RequestStatus::Active
    }

    pub fn is_boarded(&self) -> bool {
        self.status == RequestStatus::Boarded
    }

    /// Promotes an Active request to Boarded. Returns whether the status changed.
    pub fn board(&mut self) -> bool {
        if self.status == RequestStatus::Active {
            self.status = RequestStatus::Boarded;
            true
        } else {
            false
        }
    }

    /// Promotes a Boarded request to Fulfilled. Returns whether the status changed.
    pub fn deliver(&mut self) -> bool {
        if self.status == RequestStatus::Boarded {
            self.status = RequestStatus::Fulfilled;
            true
        } else {
            false
        }
    }

    /// Cancels a pending request, moving it straight to Fulfilled. Returns whether the status changed.
    pub fn evict(&mut self) -> bool {
        if self.is_pending() {
            self.status = RequestStatus::Fulfilled;
            true
        } else {
            false
        }
    }
}
