//! Domain layer for editsave
//!
//! This crate contains domain objects, their capabilities, type definitions
//! and form descriptors. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Domain objects
//!
//! A [`DomainObject`] is the item a user edits. Its [`ObjectModel`] carries a
//! `persisted` marker: absent means the object is *virtual* (created in the
//! editor, never committed), present means it has been stored at least once.
//!
//! ## Capabilities
//!
//! Behaviour is attached to objects through an explicit [`Capabilities`] map
//! rather than through the object type itself:
//!
//! - **Editor**: the editing session (commit or discard in-place edits)
//! - **Action**: invokes named actions such as `navigate`
//! - **Location**: tells originals apart from links
//! - **Type**: the type definition used to build creation forms

pub mod config;
pub mod core;
pub mod form;
pub mod object;
pub mod types;

// Re-export commonly used types
pub use config::OutputFormat;
pub use core::{error::DomainError, id::ObjectId};
pub use form::{FormControl, FormIssue, FormIssueKind, FormRow, FormSection, FormStructure, FormValue};
pub use object::{
    capability::{
        ActionCapability, ActionError, ActionKey, Capabilities, CapabilityKind, EditorCapability,
        EditorError,
    },
    entity::{DomainObject, ObjectHandle},
    location::LocationCapability,
    model::ObjectModel,
};
pub use types::{TypeDefinition, TypeProperty};
