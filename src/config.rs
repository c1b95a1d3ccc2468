//! # Configuration Management

//! This module handles the configuration loading and management for the elevator fleet service.
//! It leverages the `config` crate to provide a flexible and structured way to define and access configuration settings from various sources, including:

//! * YAML configuration files (default.yaml, development.yaml, production.yaml)
//! * Environment variables

//! The core of this module is the `Settings` struct, which encapsulates all the configuration settings required by the application.

use serde::{Deserialize, Serialize};
use config::{Config, Environment, File};
use std::env;
use std::path::PathBuf;
use log::{debug, warn};
use crate::errors::FleetError;
use crate::models::Floor;

/// Represents the complete set of configuration settings for the elevator fleet service.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Settings for application logging
    pub logging: LoggingSettings,
    /// Elevator systems handed to the provisioning collaborator at startup
    pub fleet: FleetSettings,
    /// Settings for the dispatcher
    pub dispatch: DispatchSettings,
    /// Settings for the fleet event channel
    pub events: EventSettings,
    /// Settings for the demo stepping driver
    pub simulation: SimulationSettings,
}

/// Holds the configuration settings for application logging
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    /// The logging level (e.g., "info", "debug", "error")
    pub level: String,
    /// The directory path where log files will be stored (optional)
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FleetSettings {
    pub systems: Vec<SystemSettings>,
}

/// Represents the configuration of one elevator system
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SystemSettings {
    /// Human readable name of the system
    pub name: String,
    /// The number of elevators to create
    pub elevators_count: u32,
    /// Exclusive upper bound on the floors served
    pub max_floors: Floor,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DispatchSettings {
    /// How many times a dispatch is re-ranked after losing a race for its chosen elevator
    pub max_retries: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EventSettings {
    pub channel_capacity: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SimulationSettings {
    pub step_interval_ms: u64,
    /// Stepping cycles to run before giving up on unfinished riders
    pub max_steps: u64,
    #[serde(default)]
    pub riders: Vec<RiderSettings>,
}

/// A scripted rider: created at `pickup_floor`, heading to `destination_floor`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct RiderSettings {
    pub pickup_floor: Floor,
    pub destination_floor: Floor,
}


/// # Settings Initialization
///
/// The `Settings` implementation provides a `new` function to load and construct the configuration settings.
impl Settings {
    /// Loads and constructs the application settings from various configuration sources.
    ///
    /// This function reads configuration settings from the following sources, in order of precedence:
    ///
    /// 1. `default.yaml`: Contains default settings for the application
    /// 2. Environment-specific YAML file (e.g., `development.yaml` or `production.yaml`) based on the `RUN_MODE` environment variable
    /// 3. Environment variables prefixed with `APP` (e.g., `APP__DISPATCH__MAX_RETRIES`)
    ///
    /// The `CONFIG_DIR` environment variable can be used to specify the directory where the YAML configuration files are located (defaults to "src/config").
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)`: If the settings were loaded and constructed successfully
    /// * `Err(FleetError)`: If there was an error during the loading or construction process
    pub fn new() -> Result<Self, FleetError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let config_dir = env::var("CONFIG_DIR").unwrap_or_else(|_| "src/config".into());
        debug!("Run Mode: {:?}, Config Dir: {:?}", run_mode, config_dir);

        let s = Config::builder()
            .add_source(File::with_name(&format!("{}/default", config_dir)))
            .add_source(File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        let mut s: Self = s.try_deserialize::<Settings>()
            .map_err(FleetError::from)?;

        if let Some(ref mut path) = s.logging.path {
            *path = env::current_dir()?.join(path.clone());
        }

        s.validate()?;
        s.simulation.riders.retain(|rider| {
            let keep = rider.pickup_floor != rider.destination_floor;
            if !keep {
                warn!("Dropping scripted rider with identical pickup and destination floor {}", rider.pickup_floor);
            }
            keep
        });

        Ok(s)
    }

    /// Rejects settings the core cannot run with.
    pub fn validate(&self) -> Result<(), FleetError> {
        if self.events.channel_capacity == 0 {
            return Err(FleetError::ConfigError("events.channel_capacity must be positive".to_string()));
        }
        for system in &self.fleet.systems {
            if system.max_floors <= 0 {
                return Err(FleetError::ConfigError(format!("System {} must serve at least one floor", system.name)));
            }
        }
        for rider in &self.simulation.riders {
            if rider.pickup_floor < 0 || rider.destination_floor < 0 {
                return Err(FleetError::ConfigError(format!("Rider floors must not be negative: {:?}", rider)));
            }
        }
        Ok(())
    }
}
