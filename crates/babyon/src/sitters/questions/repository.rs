use super::domain::{InterviewQuestion, QuestionId};
use crate::sitters::repository::RepositoryError;

/// Storage abstraction over the question bank.
pub trait QuestionRepository: Send + Sync {
    /// Active questions, least used first.
    fn active_by_usage(&self) -> Result<Vec<InterviewQuestion>, RepositoryError>;
    fn find_active(&self, id: QuestionId) -> Result<Option<InterviewQuestion>, RepositoryError>;
    /// Lookup regardless of the active flag, for rendering previously answered questions.
    fn find(&self, id: QuestionId) -> Result<Option<InterviewQuestion>, RepositoryError>;
}
