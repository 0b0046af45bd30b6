//! Recording dispatcher for tests
//!
//! Every instance keeps its own call history, so tests stay independent
//! when they run in parallel.

use parking_lot::Mutex;

use crate::{DispatchError, DispatchResult, QueueDispatcher, QueueEvent};

type DispatchCallback = Box<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Recorded {
    identifier_calls: usize,
    events: Vec<QueueEvent>,
    persisted: Vec<Vec<u8>>,
    stubbed_identifier: String,
    stubbed_dispatch_error: Option<DispatchError>,
    stubbed_dispatch_persisted_error: Option<DispatchError>,
}

/// Dispatcher double that records every invocation and returns injected errors
#[derive(Default)]
pub struct MockQueueDispatcher {
    recorded: Mutex<Recorded>,
    on_dispatch: Option<DispatchCallback>,
}

impl MockQueueDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `callback` after every `dispatch`, whether it fails or not
    pub fn with_dispatch_callback(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_dispatch = Some(Box::new(callback));
        self
    }

    pub fn stub_identifier(&self, identifier: impl Into<String>) {
        self.recorded.lock().stubbed_identifier = identifier.into();
    }

    /// Make every following `dispatch` fail with `error`; `None` clears it
    pub fn stub_dispatch_error(&self, error: Option<DispatchError>) {
        self.recorded.lock().stubbed_dispatch_error = error;
    }

    /// Make every following `dispatch_persisted` fail with `error`; `None` clears it
    pub fn stub_dispatch_persisted_error(&self, error: Option<DispatchError>) {
        self.recorded.lock().stubbed_dispatch_persisted_error = error;
    }

    pub fn identifier_calls(&self) -> usize {
        self.recorded.lock().identifier_calls
    }

    pub fn dispatch_calls(&self) -> usize {
        self.recorded.lock().events.len()
    }

    pub fn last_event(&self) -> Option<QueueEvent> {
        self.recorded.lock().events.last().cloned()
    }

    pub fn events(&self) -> Vec<QueueEvent> {
        self.recorded.lock().events.clone()
    }

    pub fn dispatch_persisted_calls(&self) -> usize {
        self.recorded.lock().persisted.len()
    }

    pub fn last_persisted(&self) -> Option<Vec<u8>> {
        self.recorded.lock().persisted.last().cloned()
    }

    pub fn persisted(&self) -> Vec<Vec<u8>> {
        self.recorded.lock().persisted.clone()
    }
}

impl QueueDispatcher for MockQueueDispatcher {
    fn identifier(&self) -> String {
        let mut recorded = self.recorded.lock();
        recorded.identifier_calls += 1;
        recorded.stubbed_identifier.clone()
    }

    fn dispatch(&self, event: &QueueEvent) -> DispatchResult<()> {
        let result = {
            let mut recorded = self.recorded.lock();
            recorded.events.push(event.clone());
            match &recorded.stubbed_dispatch_error {
                Some(error) => Err(error.clone()),
                None => Ok(()),
            }
        };

        if let Some(callback) = &self.on_dispatch {
            callback();
        }
        result
    }

    fn dispatch_persisted(&self, data: &[u8]) -> DispatchResult<()> {
        let mut recorded = self.recorded.lock();
        recorded.persisted.push(data.to_vec());
        match &recorded.stubbed_dispatch_persisted_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn delivery_error() -> DispatchError {
        DispatchError::Delivery {
            dispatcher: "mock".to_string(),
            message: "offline".to_string(),
        }
    }

    #[test]
    fn test_records_identifier_reads() {
        let mock = MockQueueDispatcher::new();
        assert_eq!(mock.identifier(), "");

        mock.stub_identifier("analytics");
        assert_eq!(mock.identifier(), "analytics");
        assert_eq!(mock.identifier_calls(), 2);
    }

    #[test]
    fn test_records_dispatched_events() {
        let mock = MockQueueDispatcher::new();
        let first = QueueEvent::new("mock", "first");
        let second = QueueEvent::new("mock", "second");

        mock.dispatch(&first).unwrap();
        mock.dispatch(&second).unwrap();

        assert_eq!(mock.dispatch_calls(), 2);
        assert_eq!(mock.last_event(), Some(second.clone()));
        assert_eq!(mock.events(), vec![first, second]);
    }

    #[test]
    fn test_injected_dispatch_error() {
        let mock = MockQueueDispatcher::new();
        mock.stub_dispatch_error(Some(delivery_error()));

        let event = QueueEvent::new("mock", "failing");
        assert_eq!(mock.dispatch(&event), Err(delivery_error()));
        assert_eq!(mock.dispatch_calls(), 1);

        mock.stub_dispatch_error(None);
        assert!(mock.dispatch(&event).is_ok());
        assert_eq!(mock.dispatch_calls(), 2);
    }

    #[test]
    fn test_callback_runs_on_success_and_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mock = MockQueueDispatcher::new().with_dispatch_callback(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let event = QueueEvent::new("mock", "event");
        mock.dispatch(&event).unwrap();
        mock.stub_dispatch_error(Some(delivery_error()));
        assert!(mock.dispatch(&event).is_err());

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_records_persisted_data() {
        let mock = MockQueueDispatcher::new();
        mock.dispatch_persisted(b"one").unwrap();

        mock.stub_dispatch_persisted_error(Some(DispatchError::InvalidPayload {
            message: "corrupt".to_string(),
        }));
        assert!(mock.dispatch_persisted(b"two").is_err());

        assert_eq!(mock.dispatch_persisted_calls(), 2);
        assert_eq!(mock.last_persisted(), Some(b"two".to_vec()));
        assert_eq!(mock.persisted(), vec![b"one".to_vec(), b"two".to_vec()]);
        assert_eq!(mock.dispatch_calls(), 0);
    }

    #[test]
    fn test_instances_do_not_share_state() {
        let a = MockQueueDispatcher::new();
        let b = MockQueueDispatcher::new();
        a.dispatch(&QueueEvent::new("mock", "only-a")).unwrap();
        assert_eq!(a.dispatch_calls(), 1);
        assert_eq!(b.dispatch_calls(), 0);
    }
}
