//! Dialog port for collecting structured user input.
//!
//! # Architecture
//!
//! Following the Ports and Adapters pattern:
//! - **Port**: [`DialogService`] - defined here in application layer
//! - **Adapters**: `ConsoleDialog` and `PresetDialog` - presentation layer

use async_trait::async_trait;
use editsave_domain::{FormStructure, FormValue};
use thiserror::Error;

/// Error type for dialog operations.
///
/// `Cancelled` is the normal outcome of a user backing out of the form.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DialogError {
    #[error("Dialog cancelled by user")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(String),
}

impl DialogError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DialogError::Cancelled)
    }
}

/// Port for presenting a form and collecting the submitted values.
#[async_trait]
pub trait DialogService: Send + Sync {
    /// Show `structure` pre-filled with `initial` and wait for submission.
    ///
    /// # Returns
    ///
    /// * `Ok(value)` - Values submitted by the user
    /// * `Err(DialogError::Cancelled)` - The user dismissed the form
    /// * `Err(DialogError::Io(_))` - The form could not be shown or read
    async fn get_user_input(
        &self,
        structure: &FormStructure,
        initial: &FormValue,
    ) -> Result<FormValue, DialogError>;
}
