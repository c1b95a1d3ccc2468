use std::sync::Arc;
use std::time::Duration;
use anyhow::Result;
use tracing::{error, info, warn};
use tokio::signal::ctrl_c;
use tokio::time::interval;
use elevator_fleet::init::initialize;

/// The main entry point of the elevator fleet service
///
/// This function initializes the application and drives the fleet until every scripted rider has
/// been delivered or a shutdown signal is received
#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}


/// The core logic of the elevator fleet service
///
/// This asynchronous function performs the following steps:
/// 1. Loads settings, initializes logging and provisions the configured systems
/// 2. Spawns a task to run the `EventHandler` until shutdown
/// 3. Submits the scripted riders through the dispatcher
/// 4. Runs a stepping cycle on every tick of the step interval
/// 5. Stops when every rider is delivered, the step limit is reached or Ctrl-C is pressed
/// 6. Flushes the remaining events and logs per-elevator trip statistics
///
/// # Returns
///
/// * `Ok(())` if the application runs successfully and shuts down gracefully
/// * `Err(anyhow::Error)` if any errors occur during initialization
async fn run() -> Result<()> {
    let context = initialize().await?;
    let settings = Arc::clone(&context.settings);
    let state_manager = Arc::clone(&context.state_manager);
    let fleet_controller = Arc::clone(&context.fleet_controller);

    let event_handler = Arc::clone(&context.event_handler);
    let lifecycle = state_manager.lifecycle();
    let event_task = tokio::spawn(async move {
        let shutdown = tokio::select! {
            result = event_handler.run() => {
                if let Err(e) = result {
                    error!("EventHandler error: {:?}", e);
                }
                false
            }
            _ = lifecycle.wait_for_shutdown() => true,
        };
        if shutdown {
            let flushed = event_handler.drain().await;
            info!("EventHandler flushed {} events at shutdown", flushed);
        }
    });

    fleet_controller.submit_riders().await;

    let mut step_interval = interval(Duration::from_millis(settings.simulation.step_interval_ms));
    let mut steps = 0;

    loop {
        tokio::select! {
            _ = step_interval.tick() => {
                if fleet_controller.riders_remaining() == 0 {
                    info!("All riders delivered after {} cycles", steps);
                    break;
                }
                if steps >= settings.simulation.max_steps {
                    warn!("Stopping after {} cycles with {} riders still travelling", steps, fleet_controller.riders_remaining());
                    break;
                }
                steps += 1;
                if let Err(e) = fleet_controller.run_stepping_cycle().await {
                    error!("Error during stepping cycle: {}", e);
                }
            }
            _ = ctrl_c() => {
                info!("Received shutdown signal. Shutting down gracefully...");
                break;
            }
        }
    }

    state_manager.trigger_shutdown();
    if let Err(e) = event_task.await {
        error!("EventHandler task failed: {:?}", e);
    }

    for elevator in state_manager.list_elevators().await {
        let stats = context.event_handler.stats_for(elevator.id);
        info!(
            "Elevator {} at floor {} ({}): {} moves over {} floors, {} boardings, {} deliveries",
            elevator.id, elevator.current_floor, elevator.movement_status,
            stats.moves, stats.floors_travelled, stats.boardings, stats.deliveries
        );
    }
    Ok(())
}
