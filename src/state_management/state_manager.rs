use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::Receiver;
use log::info;
use crate::config::Settings;
use crate::controllers::destination::DestinationController;
use crate::controllers::door_interlock::DoorInterlock;
use crate::controllers::maintenance::MaintenanceController;
use crate::dispatch::Dispatcher;
use crate::errors::FleetResult;
use crate::models::{Elevator, ElevatorId, FleetEvent, FleetSystem, Floor, Request, RequestId};
use crate::movement::MovementEngine;
use crate::repositories::SystemDirectory;
use crate::state_management::event_dispatcher::EventDispatcher;
use crate::state_management::fleet_state_repository::FleetStateRepository;
use crate::state_management::state_manager_lifecycle::StateManagerLifecycle;

/// Entry point for every operation the surrounding service exposes on the fleet.
#[derive(Clone)]
pub struct FleetStateManager {
    repository: Arc<FleetStateRepository>,
    systems: Arc<dyn SystemDirectory>,
    dispatcher: Arc<Dispatcher>,
    movement_engine: Arc<MovementEngine>,
    maintenance: Arc<MaintenanceController>,
    door_interlock: Arc<DoorInterlock>,
    destinations: Arc<DestinationController>,
    event_dispatcher: Arc<EventDispatcher>,
    lifecycle: Arc<StateManagerLifecycle>,
}

impl FleetStateManager {
    /// Creates a new `FleetStateManager` with an empty fleet.
    ///
    /// # Arguments
    ///
    /// * `settings` - The application settings.
    /// * `systems` - The provisioning collaborator that knows each system's floor ceiling.
    ///
    /// # Returns
    ///
    /// The manager, and the receiving end of the fleet event channel.
    pub fn new(settings: &Settings, systems: Arc<dyn SystemDirectory>) -> (Self, Receiver<FleetEvent>) {
        let repository = Arc::new(FleetStateRepository::new());
        let (event_sender, event_receiver) = mpsc::channel(settings.events.channel_capacity);
        let event_dispatcher = Arc::new(EventDispatcher::new(event_sender));

        let dispatcher = Arc::new(Dispatcher::new(
            Arc::clone(&repository),
            Arc::clone(&systems),
            Arc::clone(&event_dispatcher),
            settings.dispatch.max_retries,
        ));
        let movement_engine = Arc::new(MovementEngine::new(Arc::clone(&repository), Arc::clone(&event_dispatcher)));
        let maintenance = Arc::new(MaintenanceController::new(Arc::clone(&repository), Arc::clone(&event_dispatcher)));
        let door_interlock = Arc::new(DoorInterlock::new(Arc::clone(&repository), Arc::clone(&event_dispatcher)));
        let destinations = Arc::new(DestinationController::new(Arc::clone(&repository), Arc::clone(&event_dispatcher)));

        (Self {
            repository,
            systems,
            dispatcher,
            movement_engine,
            maintenance,
            door_interlock,
            destinations,
            event_dispatcher,
            lifecycle: Arc::new(StateManagerLifecycle::new()),
        }, event_receiver)
    }

    /// Creates the elevators of a freshly provisioned system.
    pub fn install_system(&self, system: &FleetSystem) -> Vec<ElevatorId> {
        info!("Installing system {} ({})", system.id, system.name);
        self.repository.provision_elevators(system.id, system.elevators_count)
    }

    /// Installs every system the provisioning collaborator knows about.
    pub async fn install_all_systems(&self) -> Vec<ElevatorId> {
        let mut elevator_ids = Vec::new();
        for system in self.systems.list_systems().await {
            elevator_ids.extend(self.install_system(&system));
        }
        elevator_ids
    }

    /// Creates a request at `pickup_floor` and assigns it to an elevator.
    pub async fn create_request(&self, pickup_floor: Floor) -> FleetResult<Request> {
        self.dispatcher.assign(pickup_floor).await
    }

    pub async fn set_destination(&self, request_id: RequestId, destination_floor: Floor) -> FleetResult<Request> {
        self.destinations.set_destination(request_id, destination_floor).await
    }

    /// Moves an elevator by one stop.
    pub async fn advance_elevator(&self, elevator_id: ElevatorId) -> FleetResult<Elevator> {
        self.movement_engine.advance(elevator_id).await
    }

    pub async fn toggle_door(&self, elevator_id: ElevatorId) -> FleetResult<Elevator> {
        self.door_interlock.toggle_door(elevator_id).await
    }

    pub async fn enter_maintenance(&self, elevator_id: ElevatorId) -> FleetResult<Elevator> {
        self.maintenance.enter_maintenance(elevator_id).await
    }

    /// Active and Boarded requests held by an elevator, ordered by id.
    pub async fn get_pending_requests(&self, elevator_id: ElevatorId) -> FleetResult<Vec<Request>> {
        let handle = self.repository.elevator_handle(elevator_id)?;
        let _elevator = handle.lock().await;
        Ok(self.repository.pending_requests_for(elevator_id))
    }

    /// The stop the next advance would head to, if any.
    pub async fn get_next_floor(&self, elevator_id: ElevatorId) -> FleetResult<Option<Floor>> {
        self.movement_engine.preview_next_floor(elevator_id).await
    }

    pub async fn get_elevator(&self, elevator_id: ElevatorId) -> FleetResult<Elevator> {
        self.repository.get_elevator(elevator_id).await
    }

    pub async fn list_elevators(&self) -> Vec<Elevator> {
        self.repository.get_all_elevators().await
    }

    pub fn get_request(&self, request_id: RequestId) -> FleetResult<Request> {
        self.repository.get_request(request_id)
    }

    pub fn list_requests(&self) -> Vec<Request> {
        self.repository.get_all_requests()
    }

    pub fn get_repository(&self) -> Arc<FleetStateRepository> {
        Arc::clone(&self.repository)
    }

    pub fn lifecycle(&self) -> Arc<StateManagerLifecycle> {
        Arc::clone(&self.lifecycle)
    }

    /// Signals background tasks to stop.
    pub fn trigger_shutdown(&self) {
        self.lifecycle.trigger_shutdown();
        if !self.event_dispatcher.is_channel_open() {
            info!("Event channel already closed at shutdown");
        }
    }
}
