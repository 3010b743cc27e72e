//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement. The save workflow only ever talks to these traits.

pub mod copy;
pub mod dialog;
pub mod object_service;
pub mod policy;
pub mod save_events;
