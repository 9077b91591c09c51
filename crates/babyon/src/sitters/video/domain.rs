use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sitters::domain::SitterId;
use crate::sitters::questions::{QuestionId, QuestionView};

/// Review state of a video profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfileStatus {
    Pending,
    Active,
    Inactive,
    Reviewing,
}

impl ProfileStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Reviewing => "REVIEWING",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Some(Self::Pending),
            "ACTIVE" => Some(Self::Active),
            "INACTIVE" => Some(Self::Inactive),
            "REVIEWING" => Some(Self::Reviewing),
            _ => None,
        }
    }
}

impl fmt::Display for ProfileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which of the two clips a file fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoSlot {
    Intro,
    Answer,
}

impl VideoSlot {
    /// Name used in user-facing messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Intro => "Intro Video",
            Self::Answer => "Answer Video",
        }
    }

    pub const fn folder(self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Answer => "answer",
        }
    }

    pub fn storage_folder(self, sitter_id: SitterId) -> String {
        format!("sitter/{sitter_id}/ai-profile/{}", self.folder())
    }
}

/// A file as received, before any policy check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCandidate {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    /// Declared size in bytes.
    pub size: u64,
    pub data: Bytes,
}

impl UploadCandidate {
    pub fn from_bytes(
        file_name: Option<String>,
        content_type: Option<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        let data = data.into();
        Self {
            file_name,
            content_type,
            size: data.len() as u64,
            data,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VideoUploadRequest {
    pub intro: Option<UploadCandidate>,
    pub answer: Option<UploadCandidate>,
    pub question_id: QuestionId,
    /// Raw status as supplied by the caller; parsed during the upload.
    pub status: Option<String>,
}

/// A sitter's AI video resume. One per sitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoProfile {
    pub sitter_id: SitterId,
    pub intro_video_key: String,
    pub intro_duration_seconds: Option<u32>,
    pub answer_video_key: String,
    pub answer_duration_seconds: Option<u32>,
    pub question_id: QuestionId,
    pub status: ProfileStatus,
    pub view_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// API rendering of a profile with time-limited media URLs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoProfileView {
    pub sitter_id: SitterId,
    pub intro_video_url: String,
    pub intro_duration_seconds: Option<u32>,
    pub answer_video_url: String,
    pub answer_duration_seconds: Option<u32>,
    pub question: Option<QuestionView>,
    pub status: &'static str,
    pub view_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parsing_ignores_case_and_padding() {
        assert_eq!(ProfileStatus::parse("active"), Some(ProfileStatus::Active));
        assert_eq!(ProfileStatus::parse(" Reviewing "), Some(ProfileStatus::Reviewing));
        assert_eq!(ProfileStatus::parse("ARCHIVED"), None);
    }

    #[test]
    fn slots_map_to_sitter_scoped_folders() {
        assert_eq!(
            VideoSlot::Answer.storage_folder(SitterId(9)),
            "sitter/9/ai-profile/answer"
        );
        assert_eq!(VideoSlot::Intro.label(), "Intro Video");
    }
}
