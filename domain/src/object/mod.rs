//! Domain objects and the capabilities attached to them.

pub mod capability;
pub mod entity;
pub mod location;
pub mod model;
