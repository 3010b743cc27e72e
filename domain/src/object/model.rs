//! Persistable state of a domain object.

use crate::core::error::DomainError;
use crate::core::id::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The model (plain state) of a domain object.
///
/// `persisted` is `None` if and only if the object is virtual: created in the
/// editor and never committed. Type-specific properties live in `properties`
/// and are addressed with dotted paths (`"telemetry.period"`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectModel {
    pub name: String,
    #[serde(rename = "type")]
    pub type_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persisted: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub composition: Vec<ObjectId>,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl ObjectModel {
    pub fn new(name: impl Into<String>, type_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_key: type_key.into(),
            ..Default::default()
        }
    }

    pub fn with_location(mut self, location: ObjectId) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_persisted(mut self, at: DateTime<Utc>) -> Self {
        self.persisted = Some(at);
        self
    }

    pub fn with_composition(mut self, composition: Vec<ObjectId>) -> Self {
        self.composition = composition;
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.persisted.is_some()
    }

    /// Read a type property by dotted path.
    pub fn property(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.properties.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Write a type property by dotted path, creating intermediate objects.
    ///
    /// Fails when an intermediate segment already holds a non-object value.
    pub fn set_property(&mut self, path: &str, value: Value) -> Result<(), DomainError> {
        let segments: Vec<&str> = path.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(DomainError::InvalidPropertyPath(path.to_string()));
        }

        let (last, parents) = segments
            .split_last()
            .ok_or_else(|| DomainError::InvalidPropertyPath(path.to_string()))?;

        let mut current = &mut self.properties;
        for segment in parents {
            let entry = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            current = entry
                .as_object_mut()
                .ok_or_else(|| DomainError::PropertyConflict {
                    path: path.to_string(),
                    reason: format!("'{}' is not an object", segment),
                })?;
        }
        current.insert(last.to_string(), value);
        Ok(())
    }

    /// Compare content, ignoring the `modified` and `persisted` timestamps.
    pub fn same_content(&self, other: &ObjectModel) -> bool {
        self.name == other.name
            && self.type_key == other.type_key
            && self.location == other.location
            && self.composition == other.composition
            && self.properties == other.properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_model_is_virtual() {
        let model = ObjectModel::new("Plot", "telemetry.plot");
        assert!(!model.is_persisted());
        assert!(model.location.is_none());
    }

    #[test]
    fn test_deserialize_collects_extra_properties() {
        let model: ObjectModel = serde_json::from_value(json!({
            "name": "Sine",
            "type": "generator",
            "location": "mine",
            "persisted": "2024-05-01T10:00:00Z",
            "period": 10,
        }))
        .unwrap();

        assert_eq!(model.location, Some(ObjectId::new("mine")));
        assert!(model.is_persisted());
        assert_eq!(model.property("period"), Some(&json!(10)));
    }

    #[test]
    fn test_set_nested_property() {
        let mut model = ObjectModel::new("Sine", "generator");
        model.set_property("telemetry.period", json!(5)).unwrap();
        assert_eq!(model.property("telemetry.period"), Some(&json!(5)));
        assert!(model.property("telemetry.amplitude").is_none());
    }

    #[test]
    fn test_set_property_through_scalar_conflicts() {
        let mut model = ObjectModel::new("Sine", "generator");
        model.set_property("telemetry", json!(1)).unwrap();
        let err = model.set_property("telemetry.period", json!(5)).unwrap_err();
        assert!(matches!(err, DomainError::PropertyConflict { .. }));
    }

    #[test]
    fn test_set_property_rejects_empty_segment() {
        let mut model = ObjectModel::new("Sine", "generator");
        assert!(model.set_property("a..b", json!(1)).is_err());
    }

    #[test]
    fn test_same_content_ignores_timestamps() {
        let a = ObjectModel::new("A", "folder");
        let b = a.clone().with_persisted(Utc::now());
        assert!(a.same_content(&b));
        assert!(!a.same_content(&ObjectModel::new("B", "folder")));
    }
}
