//! Error taxonomy shared by the registry storage traits.
//!
//! Each registry defines its own repository trait next to its domain types;
//! they all report failures through this enumeration so routers can map
//! storage outcomes to HTTP statuses uniformly.

/// Failure modes a repository implementation may surface.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
