//! Serializable summary of a save run.

use chrono::{DateTime, Utc};
use editsave_domain::{DomainObject, ObjectId};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveOutcome {
    Saved,
    Abandoned,
}

/// The parts of an object worth reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectSummary {
    pub id: ObjectId,
    pub name: String,
    #[serde(rename = "type")]
    pub type_key: String,
    pub location: Option<ObjectId>,
    pub persisted: Option<DateTime<Utc>>,
}

impl ObjectSummary {
    pub fn from_object(object: &DomainObject) -> Self {
        object.with_model(|model| Self {
            id: object.id().clone(),
            name: model.name.clone(),
            type_key: model.type_key.clone(),
            location: model.location.clone(),
            persisted: model.persisted,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveReport {
    /// Subcommand that ran ("create" or "edit")
    pub command: &'static str,
    pub outcome: SaveOutcome,
    pub object: Option<ObjectSummary>,
    /// Object shown in browse mode afterwards
    pub browsing: Option<ObjectId>,
}

impl SaveReport {
    pub fn new(
        command: &'static str,
        object: Option<&DomainObject>,
        browsing: Option<ObjectId>,
    ) -> Self {
        Self {
            command,
            outcome: if object.is_some() {
                SaveOutcome::Saved
            } else {
                SaveOutcome::Abandoned
            },
            object: object.map(ObjectSummary::from_object),
            browsing,
        }
    }
}
