use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_TIME_LIMIT_SECONDS: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(pub u64);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionCategory {
    Experience,
    Personality,
    Situation,
    Motivation,
    Childcare,
}

impl QuestionCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Experience => "EXPERIENCE",
            Self::Personality => "PERSONALITY",
            Self::Situation => "SITUATION",
            Self::Motivation => "MOTIVATION",
            Self::Childcare => "CHILDCARE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "EXPERIENCE" => Some(Self::Experience),
            "PERSONALITY" => Some(Self::Personality),
            "SITUATION" => Some(Self::Situation),
            "MOTIVATION" => Some(Self::Motivation),
            "CHILDCARE" => Some(Self::Childcare),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DifficultyLevel {
    Easy,
    Medium,
    Hard,
}

impl DifficultyLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "EASY" => Some(Self::Easy),
            "MEDIUM" => Some(Self::Medium),
            "HARD" => Some(Self::Hard),
            _ => None,
        }
    }
}

/// A question a sitter answers on camera. `usage_count` only grows, once per committed
/// upload that answered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub id: QuestionId,
    pub text: String,
    pub category: QuestionCategory,
    pub difficulty: DifficultyLevel,
    pub time_limit_seconds: u32,
    pub active: bool,
    pub usage_count: u64,
}

impl InterviewQuestion {
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        category: QuestionCategory,
        difficulty: DifficultyLevel,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            category,
            difficulty,
            time_limit_seconds: DEFAULT_TIME_LIMIT_SECONDS,
            active: true,
            usage_count: 0,
        }
    }

    pub fn view(&self) -> QuestionView {
        QuestionView {
            question_id: self.id,
            question_text: self.text.clone(),
            question_category: self.category.label(),
            difficulty_level: self.difficulty.label(),
            time_limit_seconds: self.time_limit_seconds,
        }
    }
}

/// Public representation handed to sitters before recording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub question_id: QuestionId,
    pub question_text: String,
    pub question_category: &'static str,
    pub difficulty_level: &'static str,
    pub time_limit_seconds: u32,
}
