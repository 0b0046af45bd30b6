//! Dispatcher contract and the tracing-backed dispatcher

use tracing::info;

use crate::{DispatchError, DispatchResult, QueueEvent};

/// Delivers queue events to their destination.
///
/// Each call is a single synchronous delivery attempt and may fail. Retry
/// and propagation policy belong to the caller.
pub trait QueueDispatcher: Send + Sync {
    /// Name of this dispatcher instance
    fn identifier(&self) -> String;

    /// Deliver one event
    fn dispatch(&self, event: &QueueEvent) -> DispatchResult<()>;

    /// Deliver an event previously persisted as opaque bytes
    fn dispatch_persisted(&self, data: &[u8]) -> DispatchResult<()>;
}

/// Dispatcher that reports events as structured `tracing` records
#[derive(Debug, Clone)]
pub struct TracingDispatcher {
    identifier: String,
}

impl TracingDispatcher {
    pub const DEFAULT_IDENTIFIER: &'static str = "tracing";

    pub fn new() -> Self {
        Self::with_identifier(Self::DEFAULT_IDENTIFIER)
    }

    pub fn with_identifier(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }
}

impl Default for TracingDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl QueueDispatcher for TracingDispatcher {
    fn identifier(&self) -> String {
        self.identifier.clone()
    }

    fn dispatch(&self, event: &QueueEvent) -> DispatchResult<()> {
        if event.dispatcher_id != self.identifier {
            return Err(DispatchError::Delivery {
                dispatcher: self.identifier.clone(),
                message: format!(
                    "event {} is addressed to dispatcher '{}'",
                    event.id, event.dispatcher_id
                ),
            });
        }

        info!(
            event_id = %event.id,
            event_name = %event.name,
            date = %event.date.to_rfc3339(),
            payload = %event.payload,
            "dispatched event"
        );
        Ok(())
    }

    fn dispatch_persisted(&self, data: &[u8]) -> DispatchResult<()> {
        let event = QueueEvent::from_bytes(data)?;
        self.dispatch(&event)
    }
}
