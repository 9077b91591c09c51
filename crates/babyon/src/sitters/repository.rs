use super::domain::{Sitter, SitterId};

/// Lookup of sitter accounts.
pub trait SitterRepository: Send + Sync {
    fn find_sitter(&self, id: SitterId) -> Result<Option<Sitter>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
