//! Queue event records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{DispatchError, DispatchResult};

/// An event waiting to be delivered by a dispatcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEvent {
    /// Unique event id
    pub id: Uuid,

    /// Creation time
    pub date: DateTime<Utc>,

    /// Identifier of the dispatcher expected to deliver this event
    pub dispatcher_id: String,

    /// Event name, e.g. `manifest_generated`
    pub name: String,

    /// Event-specific data
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl QueueEvent {
    /// Create a new event stamped with a fresh id and the current time
    pub fn new(dispatcher_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: Utc::now(),
            dispatcher_id: dispatcher_id.into(),
            name: name.into(),
            payload: serde_json::Value::Null,
        }
    }

    /// Attach a payload
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// Serialize for persistence
    pub fn to_bytes(&self) -> DispatchResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| DispatchError::InvalidPayload {
            message: format!("Failed to serialize event {}: {}", self.id, e),
        })
    }

    /// Restore a previously persisted event
    pub fn from_bytes(data: &[u8]) -> DispatchResult<Self> {
        serde_json::from_slice(data).map_err(|e| DispatchError::InvalidPayload {
            message: format!("Failed to decode persisted event: {}", e),
        })
    }
}
