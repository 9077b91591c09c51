use super::domain::VideoProfile;
use crate::sitters::domain::SitterId;
use crate::sitters::questions::QuestionRepository;
use crate::sitters::repository::{RepositoryError, SitterRepository};

/// Persistence for video profiles. Implementations must keep at most one profile per sitter.
pub trait VideoProfileRepository: QuestionRepository + SitterRepository {
    fn find_by_sitter(&self, sitter_id: SitterId) -> Result<Option<VideoProfile>, RepositoryError>;

    fn exists_for_sitter(&self, sitter_id: SitterId) -> Result<bool, RepositoryError> {
        Ok(self.find_by_sitter(sitter_id)?.is_some())
    }

    /// Upserts `profile` by sitter and increments the usage counter of
    /// `profile.question_id` as one unit: either both writes land or neither does.
    fn commit_upload(&self, profile: VideoProfile) -> Result<VideoProfile, RepositoryError>;
}
