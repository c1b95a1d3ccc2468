use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error, info};
use dashmap::DashMap;
use serde::Serialize;
use crate::errors::FleetResult;
use crate::models::{ElevatorId, FleetEvent};

/// Running totals for one elevator, built from the events it produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TripStats {
    pub moves: u64,
    pub floors_travelled: u64,
    pub boardings: u64,
    pub deliveries: u64,
    pub evictions: u64,
    pub door_toggles: u64,
}

/// Consumes fleet events: logs each one and keeps per-elevator trip statistics.
#[derive(Clone)]
pub struct EventHandler {
    /// A queue for receiving `FleetEvent`s.
    event_queue: Arc<Mutex<mpsc::Receiver<FleetEvent>>>,
    /// Trip statistics by elevator.
    stats: Arc<DashMap<ElevatorId, TripStats>>,
}

impl EventHandler {
    /// Creates a new `EventHandler`.
    ///
    /// # Arguments
    ///
    /// * `event_queue` - The receiver end of the fleet event channel.
    pub fn new(event_queue: mpsc::Receiver<FleetEvent>) -> Self {
        Self {
            event_queue: Arc::new(Mutex::new(event_queue)),
            stats: Arc::new(DashMap::new()),
        }
    }

    /// Processes events until every sender has been dropped.
    pub async fn run(&self) -> FleetResult<()> {
        info!("EventHandler started");
        while let Some(event) = self.event_queue.lock().await.recv().await {
            if let Err(e) = self.handle_event(&event) {
                error!("Error processing event: {:?}", e);
            }
        }
        info!("EventHandler stopped");
        Ok(())
    }

    /// Processes whatever is already queued without waiting for more.
    ///
    /// # Returns
    ///
    /// The number of events processed.
    pub async fn drain(&self) -> usize {
        let mut queue = self.event_queue.lock().await;
        let mut processed = 0;
        while let Ok(event) = queue.try_recv() {
            if let Err(e) = self.handle_event(&event) {
                error!("Error processing event: {:?}", e);
            }
            processed += 1;
        }
        processed
    }

    /// Logs one event and folds it into the statistics of its elevator.
    pub fn handle_event(&self, event: &FleetEvent) -> FleetResult<()> {
        debug!("Fleet event: {}", serde_json::to_string(event)?);

        let mut stats = self.stats.entry(event.elevator_id()).or_default();
        match event {
            FleetEvent::ElevatorMoved(moved) => {
                stats.moves += 1;
                stats.floors_travelled += moved.from_floor.abs_diff(moved.to_floor);
            }
            FleetEvent::RiderBoarded(_) => stats.boardings += 1,
            FleetEvent::RequestFulfilled(_) => stats.deliveries += 1,
            FleetEvent::MaintenanceEntered(maintenance) => {
                stats.evictions += maintenance.evicted_requests.len() as u64;
            }
            FleetEvent::DoorToggled(_) => stats.door_toggles += 1,
            FleetEvent::RequestAssigned(assigned) => {
                debug!("Request {} assigned to elevator {}", assigned.request_id, assigned.elevator_id);
            }
            FleetEvent::ElevatorWoken(_) | FleetEvent::ElevatorIdled(_) | FleetEvent::DestinationSet(_) => {}
        }
        Ok(())
    }

    pub fn stats_for(&self, elevator_id: ElevatorId) -> TripStats {
        self.stats.get(&elevator_id).map(|entry| *entry.value()).unwrap_or_default()
    }

    /// Statistics of every elevator that produced an event, ordered by elevator id.
    pub fn all_stats(&self) -> Vec<(ElevatorId, TripStats)> {
        let mut all: Vec<_> = self.stats.iter().map(|entry| (*entry.key(), *entry.value())).collect();
        all.sort_by_key(|(id, _)| *id);
        all
    }
}
