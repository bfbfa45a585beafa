//! Non-blocking notifications for the presentation layer (toasts).

pub const INCIDENT_REPORTED: &str = "incident-reported";
pub const INCIDENT_REJECTED: &str = "incident-rejected";
pub const VIEW_UPDATED: &str = "view-updated";

pub trait NotificationSink: Send + Sync + 'static {
    fn emit_json(&self, event: &str, payload: serde_json::Value);
}

pub struct NoopSink;

impl NotificationSink for NoopSink {
    fn emit_json(&self, _event: &str, _payload: serde_json::Value) {}
}

/// Writes every notification to the log. Used when no UI is attached.
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn emit_json(&self, event: &str, payload: serde_json::Value) {
        if event == INCIDENT_REJECTED {
            tracing::warn!(event, %payload, "notification");
        } else {
            tracing::info!(event, %payload, "notification");
        }
    }
}
