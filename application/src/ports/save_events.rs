//! Port for structured save-event logging.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port records each save
//! attempt in a machine-readable audit trail (JSONL).

use serde_json::Value;

/// A structured save event.
pub struct SaveEvent {
    /// Event type identifier (e.g., "save_started", "finalize_abandoned").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl SaveEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging save events.
///
/// `log` is synchronous and infallible; logging failures never disturb the
/// save itself.
pub trait SaveEventLogger: Send + Sync {
    fn log(&self, event: SaveEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoSaveEventLogger;

impl SaveEventLogger for NoSaveEventLogger {
    fn log(&self, _event: SaveEvent) {}
}
