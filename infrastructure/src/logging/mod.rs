//! Logging infrastructure: structured save-event logging.
//!
//! Provides [`JsonlSaveEventLogger`], a JSONL file writer that implements
//! the [`SaveEventLogger`](editsave_application::SaveEventLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlSaveEventLogger;
