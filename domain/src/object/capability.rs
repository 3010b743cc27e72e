//! Capabilities: behaviour attached to individual domain objects.
//!
//! Instead of checking whether an object "happens to have" a method, every
//! object carries a [`Capabilities`] map. Callers query it with
//! [`Capabilities::has`] (or the typed accessors) before dispatching.

use super::entity::ObjectHandle;
use crate::types::TypeDefinition;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Kinds of capability a domain object may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    /// Editing session (present only while the object is in edit mode)
    Editor,
    /// Named actions such as `navigate`
    Action,
    /// Original-vs-link location information (always present)
    Location,
    /// Type definition used to build creation forms
    Type,
}

impl CapabilityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityKind::Editor => "editor",
            CapabilityKind::Action => "action",
            CapabilityKind::Location => "location",
            CapabilityKind::Type => "type",
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by an editing session.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Editing session is no longer active")]
    Inactive,

    #[error("Persistence failed: {0}")]
    Persistence(String),
}

/// Editing session bound to exactly one domain object.
///
/// The session insulates the *original* object from live edits: changes are
/// made to an editable counterpart and only reach the original on
/// [`save`](EditorCapability::save).
#[async_trait]
pub trait EditorCapability: Send + Sync {
    /// Commit pending in-place edits to the original object.
    async fn save(&self) -> Result<(), EditorError>;

    /// Discard the editing overlay without persisting anything.
    async fn cancel(&self) -> Result<(), EditorError>;

    /// The pre-editing counterpart of the edited object.
    fn original_object(&self) -> ObjectHandle;

    /// Whether the editable object differs from the original.
    fn is_dirty(&self) -> bool;
}

/// Key of an action that can be performed on an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionKey(&'static str);

impl ActionKey {
    /// Replace the current view with a view of the object.
    pub const NAVIGATE: ActionKey = ActionKey("navigate");

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Errors raised while performing an action.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error("Action '{0}' is not supported")]
    Unsupported(ActionKey),

    #[error("Action failed: {0}")]
    Failed(String),
}

/// Performs named actions on the object it is attached to.
#[async_trait]
pub trait ActionCapability: Send + Sync {
    fn supports(&self, key: ActionKey) -> bool;

    async fn perform(&self, key: ActionKey) -> Result<(), ActionError>;
}

/// Interface map of the capabilities a single object exposes.
///
/// `Location` is derived from the object's own state and is therefore always
/// present; the remaining kinds are attached explicitly.
#[derive(Clone, Default)]
pub struct Capabilities {
    editor: Option<Arc<dyn EditorCapability>>,
    action: Option<Arc<dyn ActionCapability>>,
    type_definition: Option<TypeDefinition>,
}

impl Capabilities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_editor(mut self, editor: Arc<dyn EditorCapability>) -> Self {
        self.editor = Some(editor);
        self
    }

    pub fn with_action(mut self, action: Arc<dyn ActionCapability>) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_type(mut self, definition: TypeDefinition) -> Self {
        self.type_definition = Some(definition);
        self
    }

    pub fn has(&self, kind: CapabilityKind) -> bool {
        match kind {
            CapabilityKind::Editor => self.editor.is_some(),
            CapabilityKind::Action => self.action.is_some(),
            CapabilityKind::Location => true,
            CapabilityKind::Type => self.type_definition.is_some(),
        }
    }

    pub fn editor(&self) -> Option<&Arc<dyn EditorCapability>> {
        self.editor.as_ref()
    }

    pub fn action(&self) -> Option<&Arc<dyn ActionCapability>> {
        self.action.as_ref()
    }

    pub fn type_definition(&self) -> Option<&TypeDefinition> {
        self.type_definition.as_ref()
    }

    /// Kinds currently present, in declaration order.
    pub fn kinds(&self) -> Vec<CapabilityKind> {
        [
            CapabilityKind::Editor,
            CapabilityKind::Action,
            CapabilityKind::Location,
            CapabilityKind::Type,
        ]
        .into_iter()
        .filter(|kind| self.has(*kind))
        .collect()
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.kinds()).finish()
    }
}
