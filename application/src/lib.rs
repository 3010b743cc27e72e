//! Application layer for editsave
//!
//! This crate contains the save workflow use cases, port definitions and
//! behaviour configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::SaveBehavior;
pub use ports::{
    copy::{CopyError, CopyService, ObjectFilter},
    dialog::{DialogError, DialogService},
    object_service::{LazyObjectService, ObjectService, ObjectServiceError},
    policy::{AllowAllPolicy, PolicyCategory, PolicyService},
    save_events::{NoSaveEventLogger, SaveEvent, SaveEventLogger},
};
pub use use_cases::create_wizard::{CreateWizard, LOCATION_KEY, NAME_KEY, WizardError};
pub use use_cases::save_action::{
    ActionContext, FinalizeError, FinalizeStep, SaveAction, SaveError, SaveServices,
};
