//! Core domain concepts shared across all subdomains.
//!
//! - [`id::ObjectId`]: opaque identifier of a domain object
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod id;
