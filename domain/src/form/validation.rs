//! Validation of submitted form values against a form structure.

use super::{FormControl, FormRow, FormStructure, FormValue};
use regex::Regex;
use serde_json::Value;

/// What is wrong with a submitted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormIssueKind {
    Missing,
    PatternMismatch,
    InvalidPattern,
    WrongType,
}

/// A single validation failure, attached to a row.
#[derive(Debug, Clone, PartialEq)]
pub struct FormIssue {
    pub key: String,
    pub kind: FormIssueKind,
    pub message: String,
}

impl FormStructure {
    /// Check `value` against every row, returning all detected issues.
    pub fn validate(&self, value: &FormValue) -> Vec<FormIssue> {
        self.rows()
            .filter_map(|row| validate_row(row, value.get(row.key.as_str())))
            .collect()
    }
}

fn validate_row(row: &FormRow, value: Option<&Value>) -> Option<FormIssue> {
    let issue = |kind: FormIssueKind, message: String| {
        Some(FormIssue {
            key: row.key.clone(),
            kind,
            message,
        })
    };

    let value = match value {
        None | Some(Value::Null) => {
            return if row.required {
                issue(FormIssueKind::Missing, format!("{} is required", row.name))
            } else {
                None
            };
        }
        Some(Value::String(s)) if s.is_empty() && row.required => {
            return issue(FormIssueKind::Missing, format!("{} is required", row.name));
        }
        Some(value) => value,
    };

    let type_ok = match row.control {
        FormControl::Textfield | FormControl::Locator => value.is_string(),
        FormControl::Number => value.is_number(),
        FormControl::Checkbox => value.is_boolean(),
    };
    if !type_ok {
        return issue(
            FormIssueKind::WrongType,
            format!("{} expects a {} value", row.name, row.control.as_str()),
        );
    }

    if let (Some(pattern), Some(text)) = (&row.pattern, value.as_str()) {
        match Regex::new(pattern) {
            Ok(re) if !re.is_match(text) => {
                return issue(
                    FormIssueKind::PatternMismatch,
                    format!("{} does not match {}", row.name, pattern),
                );
            }
            Ok(_) => {}
            Err(e) => {
                return issue(
                    FormIssueKind::InvalidPattern,
                    format!("{} has an invalid pattern: {}", row.name, e),
                );
            }
        }
    }

    None
}
