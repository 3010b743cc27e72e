//! Type definitions: what a domain object of a given type looks like.
//!
//! A type definition names the type and lists the properties a user is asked
//! for when an object of that type is created.

use crate::core::error::DomainError;
use crate::form::{FormControl, FormRow};
use crate::object::model::ObjectModel;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Definition of an object type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub properties: Vec<TypeProperty>,
}

impl TypeDefinition {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            description: None,
            properties: Vec::new(),
        }
    }

    /// Fallback definition for objects whose type is not registered.
    pub fn untyped(key: &str) -> Self {
        Self::new(key, key)
    }

    pub fn with_property(mut self, property: TypeProperty) -> Self {
        self.properties.push(property);
        self
    }
}

/// A user-editable property of a type.
///
/// `key` is the dotted path of the property inside the object model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeProperty {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub control: FormControl,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl TypeProperty {
    pub fn new(key: impl Into<String>, name: impl Into<String>, control: FormControl) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            control,
            required: false,
            pattern: None,
            description: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn form_row(&self) -> FormRow {
        FormRow {
            key: self.key.clone(),
            name: self.name.clone(),
            control: self.control,
            required: self.required,
            pattern: self.pattern.clone(),
            description: self.description.clone(),
        }
    }

    /// Current value in `model`, `Null` when unset.
    pub fn value(&self, model: &ObjectModel) -> Value {
        model.property(&self.key).cloned().unwrap_or(Value::Null)
    }

    pub fn set_value(&self, model: &mut ObjectModel, value: Value) -> Result<(), DomainError> {
        model.set_property(&self.key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_property_round_trips_through_model() {
        let property = TypeProperty::new("telemetry.period", "Period", FormControl::Number);
        let mut model = ObjectModel::new("Sine", "generator");

        assert_eq!(property.value(&model), Value::Null);
        property.set_value(&mut model, json!(10)).unwrap();
        assert_eq!(property.value(&model), json!(10));
    }

    #[test]
    fn test_deserialize_defaults_control() {
        let property: TypeProperty =
            serde_json::from_value(json!({"key": "notes", "name": "Notes"})).unwrap();
        assert_eq!(property.control, FormControl::Textfield);
        assert!(!property.required);
    }

    #[test]
    fn test_form_row_copies_constraints() {
        let row = TypeProperty::new("code", "Code", FormControl::Textfield)
            .required()
            .with_pattern("^[A-Z]+$")
            .form_row();
        assert!(row.required);
        assert_eq!(row.pattern.as_deref(), Some("^[A-Z]+$"));
    }
}
