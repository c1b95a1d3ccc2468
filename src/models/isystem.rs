use serde::{Deserialize, Serialize};
use derive_more::Constructor;
use crate::models::{Floor, SystemId};

/// A provisioned elevator system, owned by the provisioning collaborator and read-only to the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Constructor)]
pub struct FleetSystem {
    pub id: SystemId,
    pub name: String,
    /// Number of elevators created when the system was provisioned.
    pub elevators_count: u32,
    /// Exclusive upper bound on floors, used by the dispatcher's wake-up direction heuristic.
    pub max_floors: Floor,
}
