use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::info;
use crate::config::Settings;
use crate::errors::FleetError;
use crate::models::{Floor, FleetSystem, SystemId};
use crate::repositories::SystemDirectory;

/// In-process stand-in for the fleet-provisioning collaborator, holding systems in memory
pub struct SystemRepository {
    systems: RwLock<BTreeMap<SystemId, FleetSystem>>,
    next_id: AtomicU64,
}

impl SystemRepository {
    pub fn new() -> Self {
        Self {
            systems: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Records a new elevator system
    ///
    /// The caller is responsible for creating the `elevators_count` elevators that belong to it
    ///
    /// # Returns
    ///
    /// * `Ok(FleetSystem)` with the assigned id
    /// * `Err(FleetError::ConfigError)` if the system would serve no floors
    pub fn register(&self, name: &str, elevators_count: u32, max_floors: Floor) -> Result<FleetSystem, FleetError> {
        if max_floors <= 0 {
            return Err(FleetError::ConfigError(format!("System {} must serve at least one floor", name)));
        }
        let id = SystemId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let system = FleetSystem::new(id, name.to_string(), elevators_count, max_floors);
        self.systems.write().insert(id, system.clone());
        info!("Registered system {} ({}): {} elevators, {} floors", id, name, elevators_count, max_floors);
        Ok(system)
    }

    /// Registers every system listed in the settings, in order
    pub fn register_from_settings(&self, settings: &Settings) -> Result<Vec<FleetSystem>, FleetError> {
        settings.fleet.systems
            .iter()
            .map(|system| self.register(&system.name, system.elevators_count, system.max_floors))
            .collect()
    }
}

impl Default for SystemRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SystemDirectory for SystemRepository {
    async fn get_system(&self, system_id: SystemId) -> Result<FleetSystem, FleetError> {
        self.systems.read()
            .get(&system_id)
            .cloned()
            .ok_or(FleetError::SystemNotFound(system_id))
    }

    async fn list_systems(&self) -> Vec<FleetSystem> {
        self.systems.read().values().cloned().collect()
    }
}
