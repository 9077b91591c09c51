use super::domain::SitterProfile;
use crate::sitters::domain::SitterId;
use crate::sitters::repository::{RepositoryError, SitterRepository};

/// Storage abstraction for general sitter profiles, keyed by sitter.
pub trait SitterProfileRepository: SitterRepository {
    fn find_profile(&self, sitter_id: SitterId) -> Result<Option<SitterProfile>, RepositoryError>;
    /// Insert-or-replace by `profile.sitter_id`.
    fn save_profile(&self, profile: SitterProfile) -> Result<SitterProfile, RepositoryError>;
    fn list_profiles(&self) -> Result<Vec<SitterProfile>, RepositoryError>;
}
