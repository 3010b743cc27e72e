//! Interactive form dialog on the terminal.
//!
//! ```text
//! ═══════════════════════════════════════════════════════════════
//!   Save a New Plot
//! ═══════════════════════════════════════════════════════════════
//!
//! Properties
//!   Title* [Unnamed Plot]: Pressure
//!   Time Span [30]:
//!
//! Location
//!   Save In* [mine]:
//!
//! Save? [Y/n]
//! ```
//!
//! Empty input keeps the value shown in brackets. `/cancel` (or `:q`) at any
//! prompt dismisses the form.

use async_trait::async_trait;
use colored::Colorize;
use editsave_application::{DialogError, DialogService};
use editsave_domain::{FormControl, FormRow, FormStructure, FormValue};
use serde_json::Value;
use std::collections::HashSet;
use std::io::{self, Write};

const CANCEL_COMMANDS: [&str; 3] = ["/cancel", ":q", "/q"];

/// What the user typed at a row prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum RowInput {
    /// Keep the current value
    Keep,
    /// Replace the value
    Set(Value),
    /// Dismiss the whole form
    Cancel,
}

/// Interpret raw input for `row` according to its control.
///
/// Returns a message to show the user when the input cannot be used.
pub fn parse_row_input(row: &FormRow, raw: &str) -> Result<RowInput, String> {
    let input = raw.trim();
    if CANCEL_COMMANDS.contains(&input) {
        return Ok(RowInput::Cancel);
    }
    if input.is_empty() {
        return Ok(RowInput::Keep);
    }

    let value = match row.control {
        FormControl::Textfield | FormControl::Locator => Value::String(input.to_string()),
        FormControl::Number => {
            if let Ok(n) = input.parse::<i64>() {
                Value::from(n)
            } else {
                input
                    .parse::<f64>()
                    .ok()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .ok_or_else(|| format!("{} expects a number", row.name))?
            }
        }
        FormControl::Checkbox => match input.to_lowercase().as_str() {
            "y" | "yes" | "true" => Value::Bool(true),
            "n" | "no" | "false" => Value::Bool(false),
            _ => return Err(format!("{} expects yes or no", row.name)),
        },
    };
    Ok(RowInput::Set(value))
}

/// Terminal implementation of the dialog port.
pub struct ConsoleDialog;

impl ConsoleDialog {
    pub fn new() -> Self {
        Self
    }

    fn display_header(&self, structure: &FormStructure) {
        let rule = "═══════════════════════════════════════════════════════════════";
        println!();
        println!("{}", rule.cyan().bold());
        println!("  {}", structure.name.cyan().bold());
        println!("{}", rule.cyan().bold());
        println!(
            "{}",
            "Press Enter to keep a value, /cancel to dismiss the form.".dimmed()
        );
    }

    fn read_line(&self, prompt: &str) -> Result<String, DialogError> {
        print!("{} ", prompt);
        io::stdout()
            .flush()
            .map_err(|e| DialogError::Io(format!("Failed to flush stdout: {}", e)))?;

        let mut input = String::new();
        let read = io::stdin()
            .read_line(&mut input)
            .map_err(|e| DialogError::Io(format!("Failed to read input: {}", e)))?;
        if read == 0 {
            // End of input dismisses the form.
            return Err(DialogError::Cancelled);
        }
        Ok(input)
    }

    /// Prompt for one row until the input is usable.
    fn prompt_row(&self, row: &FormRow, value: &mut FormValue) -> Result<(), DialogError> {
        let marker = if row.required { "*" } else { "" };
        let current = value.get(&row.key).map(display_value).unwrap_or_default();
        if let Some(description) = &row.description {
            println!("  {}", description.dimmed());
        }

        loop {
            let prompt = format!(
                "  {}{} [{}]:",
                row.name.bold(),
                marker.red(),
                current.dimmed()
            );
            match parse_row_input(row, &self.read_line(&prompt)?) {
                Ok(RowInput::Keep) => return Ok(()),
                Ok(RowInput::Set(v)) => {
                    value.insert(row.key.clone(), v);
                    return Ok(());
                }
                Ok(RowInput::Cancel) => return Err(DialogError::Cancelled),
                Err(message) => println!("  {} {}", "⚠️".yellow(), message.yellow()),
            }
        }
    }

    fn confirm(&self) -> Result<bool, DialogError> {
        loop {
            let input = self.read_line(&format!("\n{}", "Save? [Y/n]".green().bold()))?;
            match input.trim().to_lowercase().as_str() {
                "" | "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                other if CANCEL_COMMANDS.contains(&other) => return Ok(false),
                _ => println!("Please answer y or n."),
            }
        }
    }
}

impl Default for ConsoleDialog {
    fn default() -> Self {
        Self::new()
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl DialogService for ConsoleDialog {
    async fn get_user_input(
        &self,
        structure: &FormStructure,
        initial: &FormValue,
    ) -> Result<FormValue, DialogError> {
        self.display_header(structure);

        let mut value = initial.clone();
        let mut pending: Option<HashSet<String>> = None;

        loop {
            for section in &structure.sections {
                let rows: Vec<&FormRow> = section
                    .rows
                    .iter()
                    .filter(|row| pending.as_ref().is_none_or(|keys| keys.contains(&row.key)))
                    .collect();
                if rows.is_empty() {
                    continue;
                }

                println!();
                println!("{}", section.name.cyan().bold());
                for row in rows {
                    self.prompt_row(row, &mut value)?;
                }
            }

            let issues = structure.validate(&value);
            if issues.is_empty() {
                break;
            }
            println!();
            for issue in &issues {
                println!("  {} {}", "✗".red(), issue.message.red());
            }
            pending = Some(issues.into_iter().map(|issue| issue.key).collect());
        }

        if self.confirm()? {
            Ok(value)
        } else {
            Err(DialogError::Cancelled)
        }
    }
}
