//! Create wizard: the form shown when a new object is finalized.
//!
//! The wizard turns an object and a candidate parent into a
//! [`FormStructure`], supplies the object's current values as defaults, and
//! writes the submitted values back into the object's model.

use crate::ports::policy::{PolicyCategory, PolicyService};
use editsave_domain::{
    DomainError, DomainObject, FormControl, FormIssue, FormRow, FormSection, FormStructure,
    FormValue, ObjectHandle, ObjectId, TypeDefinition,
};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Row key of the object title.
pub const NAME_KEY: &str = "name";

/// Row key of the destination container.
pub const LOCATION_KEY: &str = "createParent";

/// Errors raised while populating an object from submitted values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WizardError {
    #[error("Invalid input: {}", summarize(.0))]
    InvalidInput(Vec<FormIssue>),

    #[error("A {child} cannot be saved in {parent}")]
    LocationNotAllowed { parent: ObjectId, child: String },

    #[error(transparent)]
    Property(#[from] DomainError),
}

fn summarize(issues: &[FormIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Builds and applies the creation form for one object/parent pair.
pub struct CreateWizard {
    object: ObjectHandle,
    parent: ObjectHandle,
    policy: Arc<dyn PolicyService>,
    definition: TypeDefinition,
}

impl CreateWizard {
    pub fn new(object: ObjectHandle, parent: ObjectHandle, policy: Arc<dyn PolicyService>) -> Self {
        let definition = object
            .type_definition()
            .cloned()
            .unwrap_or_else(|| TypeDefinition::untyped(&object.type_key()));

        Self {
            object,
            parent,
            policy,
            definition,
        }
    }

    /// Form structure for the object's type.
    ///
    /// The title row always comes first, followed by the type's properties.
    /// With `include_location`, a second section asks where to save.
    pub fn form_structure(&self, include_location: bool) -> FormStructure {
        let mut rows = vec![FormRow {
            key: NAME_KEY.to_string(),
            name: "Title".to_string(),
            control: FormControl::Textfield,
            required: true,
            pattern: Some(r"\S+".to_string()),
            description: Some(format!("The name of this {}", self.definition.name)),
        }];
        rows.extend(self.definition.properties.iter().map(|p| p.form_row()));

        let mut sections = vec![FormSection {
            name: "Properties".to_string(),
            rows,
        }];

        if include_location {
            sections.push(FormSection {
                name: "Location".to_string(),
                rows: vec![FormRow {
                    key: LOCATION_KEY.to_string(),
                    name: "Save In".to_string(),
                    control: FormControl::Locator,
                    required: true,
                    pattern: None,
                    description: None,
                }],
            });
        }

        FormStructure {
            name: format!("Save a New {}", self.definition.name),
            sections,
        }
    }

    /// Initial values: the object's current name and properties plus the
    /// candidate parent.
    pub fn initial_form_value(&self) -> FormValue {
        self.object.with_model(|model| {
            let mut value = FormValue::new().with(NAME_KEY, Value::String(model.name.clone()));
            for property in &self.definition.properties {
                value.insert(property.key.clone(), property.value(model));
            }
            value.insert(
                LOCATION_KEY,
                Value::String(self.parent.id().as_str().to_string()),
            );
            value
        })
    }

    /// Whether the object may be placed in `candidate`.
    pub fn validate_location(&self, candidate: &DomainObject) -> bool {
        self.policy
            .allow(PolicyCategory::Composition, candidate, &self.object)
    }

    /// Write `value` back into the object's working model.
    ///
    /// A missing or blank location keeps the candidate parent; picking a
    /// different one relocates the object there. Returns the populated object.
    pub fn populate_object_from_input(&self, value: FormValue) -> Result<ObjectHandle, WizardError> {
        let issues = self.form_structure(false).validate(&value);
        if !issues.is_empty() {
            return Err(WizardError::InvalidInput(issues));
        }

        let location = match value.get_str(LOCATION_KEY).map(str::parse::<ObjectId>) {
            Some(Ok(id)) => id,
            _ => self.parent.id().clone(),
        };

        if &location == self.parent.id() && !self.validate_location(&self.parent) {
            return Err(WizardError::LocationNotAllowed {
                parent: location,
                child: self.definition.name.clone(),
            });
        }

        debug!(
            "Populating {} from form input (location: {})",
            self.object.id(),
            location
        );

        // Staged on a copy so a failing row leaves the working model untouched.
        let mut staged = self.object.model();
        if let Some(name) = value.get_str(NAME_KEY) {
            staged.name = name.to_string();
        }
        for property in &self.definition.properties {
            if let Some(submitted) = value.get(&property.key) {
                property.set_value(&mut staged, submitted.clone())?;
            }
        }
        self.object.mutate(|model| *model = staged);

        if self.object.location_id().as_ref() != Some(&location) {
            self.object.relocate(location);
        }

        Ok(Arc::clone(&self.object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::policy::AllowAllPolicy;
    use editsave_domain::{Capabilities, ObjectModel, TypeProperty};
    use serde_json::json;

    struct DenyAll;

    impl PolicyService for DenyAll {
        fn allow(&self, _: PolicyCategory, _: &DomainObject, _: &DomainObject) -> bool {
            false
        }
    }

    fn generator_type() -> TypeDefinition {
        TypeDefinition::new("generator", "Sine Wave Generator").with_property(
            TypeProperty::new("telemetry.period", "Period", FormControl::Number).required(),
        )
    }

    fn new_object() -> ObjectHandle {
        let mut model = ObjectModel::new("Unnamed Sine Wave Generator", "generator")
            .with_location(ObjectId::new("mine"));
        model.set_property("telemetry.period", json!(10)).unwrap();
        DomainObject::new(ObjectId::new("new-1"), model)
            .with_context(ObjectId::new("mine"))
            .with_capabilities(Capabilities::new().with_type(generator_type()))
            .into_handle()
    }

    fn folder(id: &str) -> ObjectHandle {
        DomainObject::new(ObjectId::new(id), ObjectModel::new(id, "folder")).into_handle()
    }

    fn wizard(policy: Arc<dyn PolicyService>) -> CreateWizard {
        CreateWizard::new(new_object(), folder("mine"), policy)
    }

    #[test]
    fn test_form_structure_with_location() {
        let form = wizard(Arc::new(AllowAllPolicy)).form_structure(true);

        assert_eq!(form.name, "Save a New Sine Wave Generator");
        assert_eq!(form.sections.len(), 2);
        let keys: Vec<_> = form.rows().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec![NAME_KEY, "telemetry.period", LOCATION_KEY]);
        assert_eq!(form.row(LOCATION_KEY).unwrap().control, FormControl::Locator);
    }

    #[test]
    fn test_form_structure_without_location() {
        let form = wizard(Arc::new(AllowAllPolicy)).form_structure(false);
        assert_eq!(form.sections.len(), 1);
        assert!(form.row(LOCATION_KEY).is_none());
    }

    #[test]
    fn test_untyped_object_gets_title_only() {
        let object = DomainObject::new(
            ObjectId::new("x"),
            ObjectModel::new("X", "widget").with_location(ObjectId::new("mine")),
        )
        .into_handle();
        let wizard = CreateWizard::new(object, folder("mine"), Arc::new(AllowAllPolicy));
        let form = wizard.form_structure(false);
        assert_eq!(form.name, "Save a New widget");
        assert_eq!(form.rows().count(), 1);
    }

    #[test]
    fn test_initial_form_value() {
        let value = wizard(Arc::new(AllowAllPolicy)).initial_form_value();
        assert_eq!(value.get_str(NAME_KEY), Some("Unnamed Sine Wave Generator"));
        assert_eq!(value.get("telemetry.period"), Some(&json!(10)));
        assert_eq!(value.get_str(LOCATION_KEY), Some("mine"));
    }

    #[test]
    fn test_populate_writes_values_and_location() {
        let wizard = wizard(Arc::new(AllowAllPolicy));
        let mut value = wizard.initial_form_value();
        value.insert(NAME_KEY, json!("Fast Sine"));
        value.insert("telemetry.period", json!(2));
        value.insert(LOCATION_KEY, json!("shared"));

        let object = wizard.populate_object_from_input(value).unwrap();
        let model = object.model();
        assert_eq!(model.name, "Fast Sine");
        assert_eq!(model.property("telemetry.period"), Some(&json!(2)));
        assert_eq!(model.location, Some(ObjectId::new("shared")));
        assert!(object.location().is_original());
    }

    #[test]
    fn test_populate_without_location_keeps_parent() {
        let wizard = wizard(Arc::new(AllowAllPolicy));
        let value = FormValue::new()
            .with(NAME_KEY, json!("Kept"))
            .with("telemetry.period", json!(3));

        let object = wizard.populate_object_from_input(value).unwrap();
        assert_eq!(object.location_id(), Some(ObjectId::new("mine")));
    }

    #[test]
    fn test_populate_rejects_invalid_input() {
        let wizard = wizard(Arc::new(AllowAllPolicy));
        let value = FormValue::new().with(NAME_KEY, json!("  "));

        let err = wizard.populate_object_from_input(value).unwrap_err();
        match err {
            WizardError::InvalidInput(issues) => {
                let keys: Vec<_> = issues.iter().map(|i| i.key.as_str()).collect();
                assert_eq!(keys, vec![NAME_KEY, "telemetry.period"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(wizard.object.name(), "Unnamed Sine Wave Generator");
    }

    #[test]
    fn test_failed_property_leaves_model_untouched() {
        let definition = TypeDefinition::new("gauge", "Gauge")
            .with_property(TypeProperty::new("a", "A", FormControl::Number))
            .with_property(TypeProperty::new("a.b", "A B", FormControl::Number));
        let object = DomainObject::new(
            ObjectId::new("new-2"),
            ObjectModel::new("Orig", "gauge").with_location(ObjectId::new("mine")),
        )
        .with_context(ObjectId::new("mine"))
        .with_capabilities(Capabilities::new().with_type(definition))
        .into_handle();
        let wizard = CreateWizard::new(object, folder("mine"), Arc::new(AllowAllPolicy));
        let value = FormValue::new()
            .with(NAME_KEY, json!("Changed"))
            .with("a", json!(1))
            .with("a.b", json!(2));

        let err = wizard.populate_object_from_input(value).unwrap_err();

        assert!(matches!(
            err,
            WizardError::Property(DomainError::PropertyConflict { ref path, .. }) if path == "a.b"
        ));
        let model = wizard.object.model();
        assert_eq!(model.name, "Orig");
        assert_eq!(model.property("a"), None);
        assert!(model.modified.is_none());
    }

    #[test]
    fn test_populate_checks_policy_for_current_parent() {
        let wizard = wizard(Arc::new(DenyAll));
        let value = wizard.initial_form_value();
        assert!(matches!(
            wizard.populate_object_from_input(value),
            Err(WizardError::LocationNotAllowed { .. })
        ));
    }
}
