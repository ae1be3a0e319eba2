//! ph-core: shared error type, configuration, and the movie DTOs served to
//! the frontend.
//!
//! Every other ph-* crate depends on this one. Upstream wire formats live in
//! `ph-catalog`; the types here are what leaves the HTTP API.

pub mod config;
pub mod error;
pub mod lenient;
pub mod movie;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use movie::*;
