//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod create_wizard;
pub mod save_action;
