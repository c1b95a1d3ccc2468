use std::sync::Arc;
use anyhow::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use crate::config::Settings;
use crate::controllers::FleetController;
use crate::event_handling::EventHandler;
use crate::repositories::SystemRepository;
use crate::state_management::FleetStateManager;
use crate::utils::logging;


pub struct AppContext {
    pub settings: Arc<Settings>,
    pub systems: Arc<SystemRepository>,
    pub state_manager: Arc<FleetStateManager>,
    pub event_handler: Arc<EventHandler>,
    pub fleet_controller: Arc<FleetController>,
    /// Keeps the file logger flushing until the context is dropped
    pub log_guard: Option<WorkerGuard>,
}

pub async fn initialize() -> Result<AppContext> {
    let settings = Arc::new(Settings::new()?);
    let log_guard = logging::init_logger(&settings.logging.level, settings.logging.path.clone())?;

    let systems = Arc::new(SystemRepository::new());
    systems.register_from_settings(&settings)?;

    let (state_manager, event_receiver) = FleetStateManager::new(&settings, systems.clone());
    let elevator_ids = state_manager.install_all_systems().await;
    info!("Fleet ready with {} elevators", elevator_ids.len());
    let state_manager = Arc::new(state_manager);
    let event_handler = Arc::new(EventHandler::new(event_receiver));

    let fleet_controller = Arc::new(FleetController::new(
        Arc::clone(&settings),
        Arc::clone(&state_manager),
    ));

    Ok(AppContext {
        settings,
        systems,
        state_manager,
        event_handler,
        fleet_controller,
        log_guard,
    })
}
