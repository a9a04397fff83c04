//! Inbound lifecycle event and invocation result types
//!
//! The event is the instance state-change notification as delivered to the
//! function. Only `detail.instance-id` and `detail.state` matter here; the
//! rest of the envelope (version, source, region, ...) is ignored. A payload
//! missing either key fails deserialization and the invocation errors out
//! unhandled, which is the intended behavior for malformed events.

use serde::{Deserialize, Serialize};

/// Instance state-change notification envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateChangeEvent {
    pub detail: StateChangeDetail,
}

/// The `detail` block of a state-change notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateChangeDetail {
    #[serde(rename = "instance-id")]
    pub instance_id: String,
    pub state: String,
}

impl StateChangeDetail {
    /// Whether the instance has reached the running state
    pub fn is_running(&self) -> bool {
        self.state == "running"
    }
}

/// Invocation result, serialized as `{statusCode, body}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailoverResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl FailoverResponse {
    /// Full success: check disabled and every eligible route table updated
    pub fn updated() -> Self {
        Self {
            status_code: 200,
            body: "NAT configuration updated".to_string(),
        }
    }

    /// Nothing to do for this event
    ///
    /// The body still mentions "pending" although only "running" triggers an
    /// update; the text is kept verbatim for consumers that match on it.
    pub fn skipped() -> Self {
        Self {
            status_code: 204,
            body: "Instance not a NAT instance, or state not in [running, pending] :  Skipping"
                .to_string(),
        }
    }
}
