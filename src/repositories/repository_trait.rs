use async_trait::async_trait;
use crate::errors::FleetError;
use crate::models::{Floor, FleetSystem, SystemId};

/// Read-only access to the systems owned by the fleet-provisioning collaborator
///
/// The core never creates or deletes systems through this interface; it only needs the
/// floor ceiling of the system an elevator belongs to
#[async_trait]
pub trait SystemDirectory: Send + Sync {
    /// Fetches a provisioned system
    ///
    /// # Arguments
    ///
    /// * `system_id`: The identifier of the system
    ///
    /// # Returns
    ///
    /// * `Ok(FleetSystem)` if the system exists
    /// * `Err(FleetError::SystemNotFound)` otherwise
    async fn get_system(&self, system_id: SystemId) -> Result<FleetSystem, FleetError>;

    /// Lists every provisioned system, ordered by id
    async fn list_systems(&self) -> Vec<FleetSystem>;

    /// Returns the exclusive floor ceiling of a system
    async fn max_floors(&self, system_id: SystemId) -> Result<Floor, FleetError> {
        self.get_system(system_id).await.map(|system| system.max_floors)
    }
}
