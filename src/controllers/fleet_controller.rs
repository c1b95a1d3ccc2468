use std::sync::Arc;
use std::time::Instant;
use dashmap::DashMap;
use tracing::{debug, error, info, warn};
use crate::config::Settings;
use crate::errors::FleetResult;
use crate::models::{Floor, RequestId, RequestStatus};
use crate::state_management::FleetStateManager;

/// Counters for one stepping cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Destinations chosen by riders whose elevator had arrived
    pub destinations_set: usize,
    /// Elevators that moved or parked with requests still held
    pub advanced: usize,
    /// Elevators that found nothing to do and went idle
    pub idled: usize,
    /// Elevators whose advance was refused
    pub rejected: usize,
}

/// Drives the fleet for the demo binary: submits scripted riders and steps elevators on demand
pub struct FleetController {
    /// The application settings
    pub settings: Arc<Settings>,
    /// The fleet operations
    pub state_manager: Arc<FleetStateManager>,
    /// Scripted riders by request, with the floor they will choose once picked up
    riders: DashMap<RequestId, Floor>,
}

impl FleetController {
    pub fn new(settings: Arc<Settings>, state_manager: Arc<FleetStateManager>) -> Self {
        info!("Initializing Fleet Controller");
        Self {
            settings,
            state_manager,
            riders: DashMap::new(),
        }
    }

    /// Creates a request for every scripted rider
    ///
    /// Riders that cannot be dispatched are logged and skipped
    ///
    /// # Returns
    ///
    /// The number of riders that got a request
    pub async fn submit_riders(&self) -> usize {
        for rider in &self.settings.simulation.riders {
            match self.state_manager.create_request(rider.pickup_floor).await {
                Ok(request) => {
                    debug!("Rider at floor {} got request {}", rider.pickup_floor, request.id);
                    self.riders.insert(request.id, rider.destination_floor);
                }
                Err(e) => error!("Could not dispatch rider at floor {}: {}", rider.pickup_floor, e),
            }
        }
        info!("Submitted {} riders", self.riders.len());
        self.riders.len()
    }

    /// Lets every rider whose elevator is waiting at their pickup floor choose a destination
    ///
    /// # Returns
    ///
    /// The number of destinations recorded
    pub async fn assign_destinations(&self) -> usize {
        let waiting: Vec<(RequestId, Floor)> = self.riders.iter().map(|entry| (*entry.key(), *entry.value())).collect();
        let mut assigned = 0;

        for (request_id, destination_floor) in waiting {
            let Ok(request) = self.state_manager.get_request(request_id) else {
                continue;
            };
            if request.status == RequestStatus::Fulfilled || request.destination_floor.is_some() {
                continue;
            }
            let Some(elevator_id) = request.elevator_id else {
                continue;
            };
            let arrived = self.state_manager
                .get_elevator(elevator_id)
                .await
                .map(|elevator| elevator.current_floor == request.pickup_floor)
                .unwrap_or(false);
            if !arrived {
                continue;
            }

            match self.state_manager.set_destination(request_id, destination_floor).await {
                Ok(_) => assigned += 1,
                Err(e) => warn!("Rider of request {} could not choose floor {}: {}", request_id, destination_floor, e),
            }
        }
        assigned
    }

    /// Executes a single stepping cycle
    ///
    /// 1. Records destinations for riders that have been picked up
    /// 2. Advances, concurrently, every elevator that holds requests or has not yet gone idle
    ///
    /// # Returns
    ///
    /// * `Ok(CycleReport)` with the outcome counters
    /// * `Err(FleetError::TaskJoinError)` if an advance task panicked
    pub async fn run_stepping_cycle(&self) -> FleetResult<CycleReport> {
        let start = Instant::now();
        let mut report = CycleReport {
            destinations_set: self.assign_destinations().await,
            ..CycleReport::default()
        };

        let repository = self.state_manager.get_repository();
        let tasks: Vec<_> = self.state_manager
            .list_elevators()
            .await
            .into_iter()
            .filter(|elevator| {
                !elevator.under_maintenance
                    && (!elevator.is_idle() || repository.active_or_boarded_count(elevator.id) > 0)
            })
            .map(|elevator| {
                let state_manager = Arc::clone(&self.state_manager);
                tokio::spawn(async move { (elevator.id, state_manager.advance_elevator(elevator.id).await) })
            })
            .collect();

        for result in futures::future::join_all(tasks).await {
            let (elevator_id, outcome) = result?;
            match outcome {
                Ok(_) => report.advanced += 1,
                Err(e) if e.is_informational() => report.idled += 1,
                Err(e) => {
                    debug!("Elevator {} skipped this cycle: {}", elevator_id, e);
                    report.rejected += 1;
                }
            }
        }

        info!("Stepping cycle completed in {:?}: {:?}", start.elapsed(), report);
        Ok(report)
    }

    /// Number of scripted riders not yet delivered
    pub fn riders_remaining(&self) -> usize {
        self.riders
            .iter()
            .filter(|entry| {
                self.state_manager
                    .get_request(*entry.key())
                    .map(|request| request.status != RequestStatus::Fulfilled)
                    .unwrap_or(false)
            })
            .count()
    }
}
