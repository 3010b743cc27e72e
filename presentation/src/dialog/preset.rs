use async_trait::async_trait;
use editsave_application::{DialogError, DialogService, NAME_KEY};
use editsave_domain::{FormStructure, FormValue};
use serde_json::Value;

/// Non-interactive dialog: accepts the form as pre-filled.
///
/// Used for `create --yes`. Overrides are laid over the initial values
/// before submission, so `--name` reaches the object through the form.
#[derive(Debug, Clone, Default)]
pub struct PresetDialog {
    overrides: FormValue,
}

impl PresetDialog {
    pub fn new(overrides: FormValue) -> Self {
        Self { overrides }
    }

    /// Preset that submits `name` as the title.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self::new(FormValue::new().with(NAME_KEY, Value::String(name.into())))
    }
}

#[async_trait]
impl DialogService for PresetDialog {
    async fn get_user_input(
        &self,
        _structure: &FormStructure,
        initial: &FormValue,
    ) -> Result<FormValue, DialogError> {
        let mut value = initial.clone();
        value.merge(self.overrides.clone());
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_overrides_replace_initial_values() {
        let dialog = PresetDialog::new(FormValue::new().with("name", json!("Pressure")));
        let structure = FormStructure {
            name: "Save a New Plot".to_string(),
            sections: Vec::new(),
        };
        let initial = FormValue::new()
            .with("name", json!("Unnamed Plot"))
            .with("createParent", json!("mine"));

        let value = dialog.get_user_input(&structure, &initial).await.unwrap();

        assert_eq!(value.get_str("name"), Some("Pressure"));
        assert_eq!(value.get_str("createParent"), Some("mine"));
    }

    #[tokio::test]
    async fn test_with_name_overrides_title_only() {
        let dialog = PresetDialog::with_name("Pressure");
        let structure = FormStructure {
            name: "Save a New Plot".to_string(),
            sections: Vec::new(),
        };
        let initial = FormValue::new()
            .with(NAME_KEY, json!("Unnamed Plot"))
            .with("span", json!(30));

        let value = dialog.get_user_input(&structure, &initial).await.unwrap();

        assert_eq!(value.get_str(NAME_KEY), Some("Pressure"));
        assert_eq!(value.get("span"), Some(&json!(30)));
    }

    #[tokio::test]
    async fn test_default_submits_initial_values() {
        let structure = FormStructure {
            name: "Save a New Plot".to_string(),
            sections: Vec::new(),
        };
        let initial = FormValue::new().with(NAME_KEY, json!("Unnamed Plot"));

        let value = PresetDialog::default()
            .get_user_input(&structure, &initial)
            .await
            .unwrap();

        assert_eq!(value, initial);
    }
}
