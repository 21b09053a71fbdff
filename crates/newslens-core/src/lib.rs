//! newslens-core
//!
//! Shared vocabulary for the newslens workspace: domain types, the error
//! taxonomy, collaborator traits, configuration and the local corpus loader.

pub mod config;
pub mod corpus;
pub mod error;
pub mod languages;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use languages::language_code;
