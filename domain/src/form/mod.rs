//! Form descriptors presented to the user for input.
//!
//! A [`FormStructure`] is an ordered list of sections, each an ordered list
//! of rows. A [`FormValue`] maps row keys to submitted (or initial) values.

mod validation;

pub use validation::{FormIssue, FormIssueKind};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Kind of input control used to render a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormControl {
    #[default]
    Textfield,
    Number,
    Checkbox,
    /// Picks a destination container; the value is an object id
    Locator,
}

impl FormControl {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormControl::Textfield => "textfield",
            FormControl::Number => "number",
            FormControl::Checkbox => "checkbox",
            FormControl::Locator => "locator",
        }
    }
}

/// A single input row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormRow {
    pub key: String,
    pub name: String,
    pub control: FormControl,
    pub required: bool,
    pub pattern: Option<String>,
    pub description: Option<String>,
}

/// A named group of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSection {
    pub name: String,
    pub rows: Vec<FormRow>,
}

/// Complete form: title plus ordered sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormStructure {
    pub name: String,
    pub sections: Vec<FormSection>,
}

impl FormStructure {
    pub fn rows(&self) -> impl Iterator<Item = &FormRow> {
        self.sections.iter().flat_map(|section| section.rows.iter())
    }

    pub fn row(&self, key: &str) -> Option<&FormRow> {
        self.rows().find(|row| row.key == key)
    }
}

/// Values keyed by row key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValue(BTreeMap<String, Value>);

impl FormValue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value of `key`, ignoring non-string entries.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Overlay every entry of `other` on top of `self`.
    pub fn merge(&mut self, other: FormValue) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
