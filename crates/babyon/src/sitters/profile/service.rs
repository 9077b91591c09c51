use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{SitterProfile, SitterProfileUpdate};
use super::repository::SitterProfileRepository;
use super::search::{Page, SitterSearch};
use crate::sitters::domain::SitterId;
use crate::sitters::repository::RepositoryError;

pub struct SitterProfileService<R> {
    repository: Arc<R>,
}

impl<R> SitterProfileService<R>
where
    R: SitterProfileRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns the sitter's profile, creating an empty one on first access.
    pub fn get_or_create(&self, sitter_id: SitterId) -> Result<SitterProfile, SitterProfileError> {
        self.repository
            .find_sitter(sitter_id)?
            .ok_or(SitterProfileError::SitterNotFound(sitter_id))?;

        if let Some(profile) = self.repository.find_profile(sitter_id)? {
            return Ok(profile);
        }

        let profile = self
            .repository
            .save_profile(SitterProfile::empty(sitter_id, Utc::now()))?;
        info!(sitter_id = %sitter_id, "created empty sitter profile");
        Ok(profile)
    }

    pub fn update(
        &self,
        sitter_id: SitterId,
        update: SitterProfileUpdate,
    ) -> Result<SitterProfile, SitterProfileError> {
        let mut profile = self.get_or_create(sitter_id)?;
        profile.apply(update, Utc::now());
        let saved = self.repository.save_profile(profile)?;
        info!(
            sitter_id = %sitter_id,
            profile_completed = saved.profile_completed,
            "sitter profile updated"
        );
        Ok(saved)
    }

    pub fn search(&self, search: &SitterSearch) -> Result<Page<SitterProfile>, SitterProfileError> {
        let profiles = self.repository.list_profiles()?;
        Ok(search.run(profiles))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SitterProfileError {
    #[error("Sitter {0} not found")]
    SitterNotFound(SitterId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl SitterProfileError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SitterNotFound(_) => "SITTER_NOT_FOUND",
            Self::Repository(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}
