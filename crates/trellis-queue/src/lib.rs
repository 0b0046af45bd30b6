//! Event dispatch boundary for Trellis
//!
//! Analytics and telemetry events leave the generator through a
//! [`QueueDispatcher`]. This crate defines the event record, the dispatcher
//! contract, a dispatcher that emits events as tracing records, and (behind
//! the `testing` feature) a recording test double.
//!
//! Dispatch is synchronous and may fail per call with a
//! [`DispatchError`]; callers decide whether to retry, log or propagate.

pub mod dispatcher;
pub mod event;
#[cfg(any(test, feature = "testing"))]
pub mod mock;

// Re-export main types
pub use dispatcher::{QueueDispatcher, TracingDispatcher};
pub use event::QueueEvent;
#[cfg(any(test, feature = "testing"))]
pub use mock::MockQueueDispatcher;

pub use trellis_core::error::DispatchError;

/// Result type for dispatch operations
pub type DispatchResult<T> = Result<T, DispatchError>;
