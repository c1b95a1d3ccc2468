use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::info;
use crate::errors::{FleetError, FleetResult};
use crate::models::{Elevator, ElevatorId, Request, RequestId, SystemId};

/// Exclusive handle to one elevator. Every mutation of the elevator, and of the requests assigned
/// to it, happens while this lock is held.
pub type ElevatorHandle = Arc<Mutex<Elevator>>;

/// In-memory store of the fleet: elevators behind one lock each, and the request records
///
/// Fulfilled requests stay in `requests` for reads; `pending` indexes only the Active and Boarded
/// ones per elevator, so load queries never touch finished trips.
pub struct FleetStateRepository {
    elevators: DashMap<ElevatorId, ElevatorHandle>,
    requests: DashMap<RequestId, Request>,
    pending: DashMap<ElevatorId, BTreeSet<RequestId>>,
    next_elevator_id: AtomicU64,
    next_request_id: AtomicU64,
}

impl FleetStateRepository {
    pub fn new() -> Self {
        Self {
            elevators: DashMap::new(),
            requests: DashMap::new(),
            pending: DashMap::new(),
            next_elevator_id: AtomicU64::new(1),
            next_request_id: AtomicU64::new(1),
        }
    }

    /// Creates `count` idle elevators for a freshly provisioned system
    pub fn provision_elevators(&self, system_id: SystemId, count: u32) -> Vec<ElevatorId> {
        let ids: Vec<ElevatorId> = (0..count)
            .map(|_| {
                let id = ElevatorId(self.next_elevator_id.fetch_add(1, Ordering::SeqCst));
                self.elevators.insert(id, Arc::new(Mutex::new(Elevator::new(id, system_id))));
                id
            })
            .collect();
        info!("Provisioned {} elevators for system {}", ids.len(), system_id);
        ids
    }

    pub fn elevator_handle(&self, elevator_id: ElevatorId) -> FleetResult<ElevatorHandle> {
        self.elevators
            .get(&elevator_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(FleetError::ElevatorNotFound(elevator_id))
    }

    /// All elevator handles, ordered by id
    pub fn elevator_handles(&self) -> Vec<(ElevatorId, ElevatorHandle)> {
        let mut handles: Vec<_> = self.elevators
            .iter()
            .map(|entry| (*entry.key(), Arc::clone(entry.value())))
            .collect();
        handles.sort_by_key(|(id, _)| *id);
        handles
    }

    pub async fn get_elevator(&self, elevator_id: ElevatorId) -> FleetResult<Elevator> {
        let handle = self.elevator_handle(elevator_id)?;
        let elevator = handle.lock().await;
        Ok(elevator.clone())
    }

    pub async fn get_all_elevators(&self) -> Vec<Elevator> {
        let mut elevators = Vec::new();
        for (_, handle) in self.elevator_handles() {
            elevators.push(handle.lock().await.clone());
        }
        elevators
    }

    pub fn next_request_id(&self) -> RequestId {
        RequestId(self.next_request_id.fetch_add(1, Ordering::SeqCst))
    }

    pub fn insert_request(&self, request: Request) {
        self.next_request_id.fetch_max(request.id.0 + 1, Ordering::SeqCst);
        self.index_request(&request);
        self.requests.insert(request.id, request);
    }

    pub fn get_request(&self, request_id: RequestId) -> FleetResult<Request> {
        self.requests
            .get(&request_id)
            .map(|entry| entry.value().clone())
            .ok_or(FleetError::RequestNotFound(request_id))
    }

    /// All requests, ordered by id
    pub fn get_all_requests(&self) -> Vec<Request> {
        let mut requests: Vec<Request> = self.requests.iter().map(|entry| entry.value().clone()).collect();
        requests.sort_by_key(|request| request.id);
        requests
    }

    /// Active and Boarded requests assigned to an elevator, ordered by id
    pub fn pending_requests_for(&self, elevator_id: ElevatorId) -> Vec<Request> {
        let request_ids: Vec<RequestId> = self.pending
            .get(&elevator_id)
            .map(|entry| entry.iter().copied().collect())
            .unwrap_or_default();
        request_ids
            .into_iter()
            .filter_map(|request_id| self.requests.get(&request_id).map(|entry| entry.value().clone()))
            .collect()
    }

    pub fn active_or_boarded_count(&self, elevator_id: ElevatorId) -> usize {
        self.pending.get(&elevator_id).map_or(0, |entry| entry.len())
    }

    /// Writes request records back, replacing the stored versions
    pub fn store_requests(&self, requests: impl IntoIterator<Item = Request>) {
        for request in requests {
            self.index_request(&request);
            self.requests.insert(request.id, request);
        }
    }

    fn index_request(&self, request: &Request) {
        let Some(elevator_id) = request.elevator_id else {
            return;
        };
        if request.is_pending() {
            self.pending.entry(elevator_id).or_default().insert(request.id);
        } else if let Some(mut entry) = self.pending.get_mut(&elevator_id) {
            entry.remove(&request.id);
        }
    }
}

impl Default for FleetStateRepository {
    fn default() -> Self {
        Self::new()
    }
}
