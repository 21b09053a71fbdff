use thiserror::Error;

/// Failure categories shared by every newslens crate.
///
/// `Input` is the caller's fault and is never retried. `Fetch` and `Provider`
/// come from external collaborators. `Computation` marks an internal invariant
/// that did not hold (for example ragged vectors reaching the clustering step).
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Failed to fetch article: {0}")]
    Fetch(String),

    #[error("Provider failed: {0}")]
    Provider(String),

    #[error("Computation failed: {0}")]
    Computation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
