//! Interview question bank used by AI video resumes.

pub mod domain;
mod import;
pub mod repository;
mod selection;

pub use domain::{
    DifficultyLevel, InterviewQuestion, QuestionCategory, QuestionId, QuestionView,
    DEFAULT_TIME_LIMIT_SECONDS,
};
pub use import::{default_question_bank, load_questions_csv, QuestionImportError};
pub use repository::QuestionRepository;
pub use selection::{select_question, NoQuestionsAvailable};
