//! Console output formatter for save results

use crate::output::report::{SaveOutcome, SaveReport};
use colored::Colorize;
use editsave_domain::OutputFormat;

/// Formats save reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn render(report: &SaveReport, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => Self::format(report),
            OutputFormat::Json => Self::format_json(report),
        }
    }

    /// Format a human readable summary
    pub fn format(report: &SaveReport) -> String {
        let mut output = String::new();

        match (&report.outcome, &report.object) {
            (SaveOutcome::Saved, Some(object)) => {
                output.push_str(&format!(
                    "{} {} {}\n",
                    "✓".green().bold(),
                    format!("Saved {}", object.type_key).green().bold(),
                    format!("\"{}\"", object.name).bold()
                ));
                output.push_str(&Self::field("id", object.id.as_str()));
                if let Some(location) = &object.location {
                    output.push_str(&Self::field("location", location.as_str()));
                }
                if let Some(persisted) = &object.persisted {
                    output.push_str(&Self::field("persisted", &persisted.to_rfc3339()));
                }
            }
            _ => {
                output.push_str(&format!(
                    "{} {}\n",
                    "✗".yellow().bold(),
                    "Save abandoned, nothing was stored".yellow()
                ));
            }
        }

        if let Some(browsing) = &report.browsing {
            output.push_str(&Self::field("browsing", browsing.as_str()));
        }

        output
    }

    /// Format as JSON
    pub fn format_json(report: &SaveReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    fn field(label: &str, value: &str) -> String {
        format!("  {:<10} {}\n", format!("{}:", label).cyan(), value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::ObjectSummary;
    use chrono::Utc;
    use editsave_domain::ObjectId;

    fn saved() -> SaveReport {
        SaveReport {
            command: "create",
            outcome: SaveOutcome::Saved,
            object: Some(ObjectSummary {
                id: ObjectId::new("abc"),
                name: "Pressure".to_string(),
                type_key: "plot".to_string(),
                location: Some(ObjectId::new("mine")),
                persisted: Some(Utc::now()),
            }),
            browsing: Some(ObjectId::new("abc")),
        }
    }

    #[test]
    fn test_format_saved() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format(&saved());
        assert!(text.contains("Saved plot \"Pressure\""));
        assert!(text.contains("abc"));
        assert!(text.contains("mine"));
    }

    #[test]
    fn test_format_abandoned() {
        colored::control::set_override(false);
        let report = SaveReport {
            command: "create",
            outcome: SaveOutcome::Abandoned,
            object: None,
            browsing: None,
        };
        let text = ConsoleFormatter::format(&report);
        assert!(text.contains("Save abandoned"));
        assert!(!text.contains("browsing"));
    }

    #[test]
    fn test_format_json() {
        let json = ConsoleFormatter::render(&saved(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["outcome"], "saved");
        assert_eq!(value["object"]["type"], "plot");
        assert_eq!(value["object"]["location"], "mine");
        assert_eq!(value["browsing"], "abc");
    }
}
