//! Infrastructure layer for editsave
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: an in-memory object store, a store-backed copy engine,
//! buffered editing sessions, navigation tracking, a composition policy,
//! configuration file loading and JSONL save-event logging.

pub mod config;
pub mod copy;
pub mod editing;
pub mod logging;
pub mod navigation;
pub mod policy;
pub mod store;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigIssueCode, ConfigLoader, FileConfig, FileLoggingConfig, FileOutputConfig,
    FilePolicyConfig, FileSaveConfig, FileWorkspaceConfig, Severity,
};
pub use copy::StoreCopyService;
pub use editing::{BufferedEditor, EditSessionFactory};
pub use logging::JsonlSaveEventLogger;
pub use navigation::{NavigateAction, NavigationTracker};
pub use policy::CompositionPolicy;
pub use store::{InMemoryObjectStore, StoreError, WorkspaceFile};
