pub mod ielevator;
pub mod irequest;
pub mod isystem;
pub mod ievents;
pub mod istates;

pub use ielevator::*;
pub use irequest::*;
pub use isystem::*;
pub use ievents::*;
pub use istates::*;

use chrono::{Local, NaiveDateTime};
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// A floor number. Elevator floors are never negative.
pub type Floor = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From)]
#[serde(transparent)]
#[display("{_0}")]
pub struct ElevatorId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From)]
#[serde(transparent)]
#[display("{_0}")]
pub struct RequestId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From)]
#[serde(transparent)]
#[display("{_0}")]
pub struct SystemId(pub u64);

pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}
