use std::io::Read;

use serde::{Deserialize, Deserializer};

use super::domain::{
    DifficultyLevel, InterviewQuestion, QuestionCategory, QuestionId, DEFAULT_TIME_LIMIT_SECONDS,
};

#[derive(Debug, thiserror::Error)]
pub enum QuestionImportError {
    #[error("failed to read question CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: unknown question category '{value}'")]
    UnknownCategory { row: usize, value: String },
    #[error("row {row}: unknown difficulty level '{value}'")]
    UnknownDifficulty { row: usize, value: String },
    #[error("row {row}: question text is empty")]
    EmptyText { row: usize },
    #[error("row {row}: time limit '{value}' is not a positive number of seconds")]
    InvalidTimeLimit { row: usize, value: String },
    #[error("row {row}: active flag '{value}' must be true/false, 1/0 or yes/no")]
    InvalidActive { row: usize, value: String },
}

#[derive(Debug, Deserialize)]
struct QuestionRow {
    question_text: String,
    category: String,
    difficulty: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    time_limit_seconds: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    active: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Reads a question bank export. Ids are assigned from 1 in file order; usage starts at 0.
pub fn load_questions_csv<R: Read>(reader: R) -> Result<Vec<InterviewQuestion>, QuestionImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut questions = Vec::new();

    for (index, record) in csv_reader.deserialize::<QuestionRow>().enumerate() {
        let row = record?;
        // header is line 1
        let line = index + 2;

        if row.question_text.is_empty() {
            return Err(QuestionImportError::EmptyText { row: line });
        }
        let category = QuestionCategory::parse(&row.category).ok_or_else(|| {
            QuestionImportError::UnknownCategory {
                row: line,
                value: row.category.clone(),
            }
        })?;
        let difficulty = DifficultyLevel::parse(&row.difficulty).ok_or_else(|| {
            QuestionImportError::UnknownDifficulty {
                row: line,
                value: row.difficulty.clone(),
            }
        })?;

        let mut question = InterviewQuestion::new(
            QuestionId(questions.len() as u64 + 1),
            row.question_text,
            category,
            difficulty,
        );
        if let Some(raw) = row.time_limit_seconds {
            question.time_limit_seconds = raw
                .parse::<u32>()
                .ok()
                .filter(|seconds| *seconds > 0)
                .ok_or(QuestionImportError::InvalidTimeLimit {
                    row: line,
                    value: raw,
                })?;
        }
        if let Some(raw) = row.active {
            question.active =
                parse_flag(&raw).ok_or(QuestionImportError::InvalidActive { row: line, value: raw })?;
        }
        questions.push(question);
    }

    Ok(questions)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Built-in starter bank covering every category.
pub fn default_question_bank() -> Vec<InterviewQuestion> {
    use DifficultyLevel::*;
    use QuestionCategory::*;

    let seed = [
        ("Tell us about the most memorable family you have cared for.", Experience, Easy),
        ("How did you handle a child who refused to eat a meal?", Experience, Medium),
        ("Describe yourself in three words a child would use.", Personality, Easy),
        ("What do you do to stay patient on a long, hard day?", Personality, Medium),
        ("A toddler falls and bumps their head at the playground. Walk us through your next ten minutes.", Situation, Hard),
        ("Two siblings are fighting over the same toy. What do you do?", Situation, Medium),
        ("The parent is late for pickup and unreachable. How do you respond?", Situation, Hard),
        ("Why did you choose to work in childcare?", Motivation, Easy),
        ("What keeps you motivated when a child is having a difficult week?", Motivation, Medium),
        ("How do you balance screen time with other activities?", Childcare, Medium),
        ("What does a good day look like for a four-year-old in your care?", Childcare, Easy),
        ("How do you support a child's routine when parents have different rules?", Childcare, Hard),
    ];

    seed.into_iter()
        .enumerate()
        .map(|(index, (text, category, difficulty))| {
            InterviewQuestion::new(QuestionId(index as u64 + 1), text, category, difficulty)
        })
        .collect()
}
