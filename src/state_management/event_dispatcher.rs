use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use crate::errors::FleetResult;
use crate::models::FleetEvent;
use tracing::{debug, warn};

/// Publishes fleet events to the event handler.
///
/// Sending never waits: a full or closed channel drops the event with a warning, so a slow
/// consumer can never stall an elevator operation.
pub struct EventDispatcher {
    /// The sender end of a channel for dispatching events.
    event_sender: mpsc::Sender<FleetEvent>,
}

impl EventDispatcher {
    /// Creates a new `EventDispatcher`.
    ///
    /// # Arguments
    ///
    /// * `event_sender` - The sender end of a channel for dispatching events.
    pub fn new(event_sender: mpsc::Sender<FleetEvent>) -> Self {
        Self { event_sender }
    }

    /// Dispatches an event to the event handler.
    ///
    /// # Returns
    ///
    /// A `FleetResult` that is an error when the channel is full or closed.
    pub fn dispatch_event(&self, event: FleetEvent) -> FleetResult<()> {
        debug!("Dispatching event: {:?}", event);
        self.event_sender.try_send(event).map_err(|e| {
            match &e {
                TrySendError::Full(event) => warn!("Event channel full, dropping {:?}", event),
                TrySendError::Closed(event) => debug!("Event channel closed, dropping {:?}", event),
            }
            e.into()
        })
    }

    /// Dispatches multiple events, carrying on past events that could not be delivered.
    pub fn dispatch_events(&self, events: Vec<FleetEvent>) {
        for event in events {
            let _ = self.dispatch_event(event);
        }
    }

    /// Checks if the event channel is still open and able to send events.
    pub fn is_channel_open(&self) -> bool {
        !self.event_sender.is_closed()
    }
}
