use tokio::sync::Notify;
use std::sync::atomic::{AtomicBool, Ordering};
use log::info;

/// Shutdown signalling shared by the fleet service and its background tasks.
pub struct StateManagerLifecycle {
    /// Signal for triggering and waiting for shutdown.
    shutdown_signal: Notify,
    /// Boolean flag to indicate if shutdown has been triggered.
    shutdown_triggered: AtomicBool,
}

impl StateManagerLifecycle {
    pub fn new() -> Self {
        Self {
            shutdown_signal: Notify::new(),
            shutdown_triggered: AtomicBool::new(false),
        }
    }

    /// Waits for the shutdown signal.
    ///
    /// Returns immediately if shutdown was already triggered.
    pub async fn wait_for_shutdown(&self) {
        let notified = self.shutdown_signal.notified();
        if self.is_shutdown_triggered() {
            return;
        }
        notified.await;
        info!("Shutdown signal received");
    }

    /// Triggers the shutdown signal.
    ///
    /// This method notifies all tasks waiting on the shutdown signal to begin their shutdown process.
    pub fn trigger_shutdown(&self) {
        info!("Triggering shutdown");
        self.shutdown_triggered.store(true, Ordering::SeqCst);
        self.shutdown_signal.notify_waiters();
    }

    /// Checks if the shutdown signal has been triggered.
    pub fn is_shutdown_triggered(&self) -> bool {
        self.shutdown_triggered.load(Ordering::SeqCst)
    }
}

impl Default for StateManagerLifecycle {
    fn default() -> Self {
        Self::new()
    }
}
