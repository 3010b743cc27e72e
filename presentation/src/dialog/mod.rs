//! Adapters for the [`DialogService`](editsave_application::DialogService) port.
//!
//! - [`ConsoleDialog`] prompts for each row on the terminal
//! - [`PresetDialog`] submits the initial values (plus overrides) untouched

mod console;
mod preset;

pub use console::{ConsoleDialog, RowInput, parse_row_input};
pub use preset::PresetDialog;
