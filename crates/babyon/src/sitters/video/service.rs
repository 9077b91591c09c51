use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use tracing::{info, warn};

use super::config::{VideoPolicyConfig, MIB};
use super::domain::{
    ProfileStatus, UploadCandidate, VideoProfile, VideoProfileView, VideoSlot, VideoUploadRequest,
};
use super::policy::{DurationProbe, UnavailableDurationProbe, UploadPolicy};
use super::repository::VideoProfileRepository;
use crate::sitters::domain::SitterId;
use crate::sitters::questions::{select_question, NoQuestionsAvailable, QuestionId, QuestionView};
use crate::sitters::repository::RepositoryError;
use crate::storage::{BlobStore, BlobUpload, StorageError};

/// Question hand-out and upload orchestration for AI video resumes.
pub struct VideoProfileService<R, B> {
    repository: Arc<R>,
    blobs: Arc<B>,
    policy: UploadPolicy,
    probe: Arc<dyn DurationProbe>,
}

impl<R, B> VideoProfileService<R, B>
where
    R: VideoProfileRepository + 'static,
    B: BlobStore + 'static,
{
    pub fn new(repository: Arc<R>, blobs: Arc<B>, config: VideoPolicyConfig) -> Self {
        Self {
            repository,
            blobs,
            policy: UploadPolicy::new(config),
            probe: Arc::new(UnavailableDurationProbe),
        }
    }

    pub fn with_probe(mut self, probe: Arc<dyn DurationProbe>) -> Self {
        self.probe = probe;
        self
    }

    pub fn config(&self) -> &VideoPolicyConfig {
        self.policy.config()
    }

    pub fn random_question(&self) -> Result<QuestionView, VideoProfileError> {
        self.random_question_with(&mut rand::thread_rng())
    }

    /// Picks one of the least used active questions. Does not touch usage counters.
    pub fn random_question_with<G: Rng + ?Sized>(
        &self,
        rng: &mut G,
    ) -> Result<QuestionView, VideoProfileError> {
        let pool = self.repository.active_by_usage()?;
        let question = select_question(&pool, self.config().question_sample_size, rng)?;
        info!(
            question_id = %question.id,
            category = question.category.label(),
            usage_count = question.usage_count,
            "selected interview question"
        );
        Ok(question.view())
    }

    /// Validates both clips, stores them and upserts the sitter's profile. Nothing is
    /// written until every check has passed.
    pub fn upload_or_update(
        &self,
        sitter_id: SitterId,
        request: VideoUploadRequest,
    ) -> Result<VideoProfile, VideoProfileError> {
        self.repository
            .find_sitter(sitter_id)?
            .ok_or(VideoProfileError::SitterNotFound(sitter_id))?;
        self.repository
            .find_active(request.question_id)?
            .ok_or(VideoProfileError::QuestionNotFound(request.question_id))?;

        let intro = self
            .policy
            .check_file(VideoSlot::Intro, request.intro.as_ref())?;
        let answer = self
            .policy
            .check_file(VideoSlot::Answer, request.answer.as_ref())?;

        let intro_duration =
            self.policy
                .check_duration(VideoSlot::Intro, intro, self.probe.as_ref())?;
        let answer_duration =
            self.policy
                .check_duration(VideoSlot::Answer, answer, self.probe.as_ref())?;

        let requested_status = request
            .status
            .as_deref()
            .map(|raw| {
                ProfileStatus::parse(raw)
                    .ok_or_else(|| VideoProfileError::InvalidStatus(raw.to_string()))
            })
            .transpose()?;

        let existing = self.repository.find_by_sitter(sitter_id)?;

        let intro_key = self.store(sitter_id, VideoSlot::Intro, intro)?;
        let answer_key = match self.store(sitter_id, VideoSlot::Answer, answer) {
            Ok(key) => key,
            Err(error) => {
                self.discard(&[intro_key.as_str()]);
                return Err(error);
            }
        };

        let now = Utc::now();
        let profile = VideoProfile {
            sitter_id,
            intro_video_key: intro_key.clone(),
            intro_duration_seconds: intro_duration,
            answer_video_key: answer_key.clone(),
            answer_duration_seconds: answer_duration,
            question_id: request.question_id,
            status: requested_status
                .or(existing.as_ref().map(|profile| profile.status))
                .unwrap_or(ProfileStatus::Pending),
            view_count: existing.as_ref().map_or(0, |profile| profile.view_count),
            created_at: existing.as_ref().map_or(now, |profile| profile.created_at),
            updated_at: now,
        };

        match self.repository.commit_upload(profile) {
            Ok(saved) => {
                info!(
                    sitter_id = %sitter_id,
                    question_id = %saved.question_id,
                    status = saved.status.label(),
                    replaced = existing.is_some(),
                    "video profile committed"
                );
                Ok(saved)
            }
            Err(error) => {
                self.discard(&[intro_key.as_str(), answer_key.as_str()]);
                Err(error.into())
            }
        }
    }

    pub fn get_profile(&self, sitter_id: SitterId) -> Result<VideoProfileView, VideoProfileError> {
        let profile = self
            .repository
            .find_by_sitter(sitter_id)?
            .ok_or(VideoProfileError::ProfileNotFound(sitter_id))?;
        self.render(&profile)
    }

    pub fn has_profile(&self, sitter_id: SitterId) -> Result<bool, VideoProfileError> {
        Ok(self.repository.exists_for_sitter(sitter_id)?)
    }

    /// Renders stored media keys as presigned read URLs.
    pub fn render(&self, profile: &VideoProfile) -> Result<VideoProfileView, VideoProfileError> {
        let ttl = self.config().presigned_url_ttl;
        let question = self
            .repository
            .find(profile.question_id)?
            .map(|question| question.view());

        Ok(VideoProfileView {
            sitter_id: profile.sitter_id,
            intro_video_url: self.blobs.presign_read(&profile.intro_video_key, ttl)?,
            intro_duration_seconds: profile.intro_duration_seconds,
            answer_video_url: self.blobs.presign_read(&profile.answer_video_key, ttl)?,
            answer_duration_seconds: profile.answer_duration_seconds,
            question,
            status: profile.status.label(),
            view_count: profile.view_count,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        })
    }

    fn store(
        &self,
        sitter_id: SitterId,
        slot: VideoSlot,
        candidate: &UploadCandidate,
    ) -> Result<String, VideoProfileError> {
        let folder = slot.storage_folder(sitter_id);
        let key = self.blobs.put(BlobUpload {
            data: &candidate.data,
            content_type: candidate.content_type.as_deref().unwrap_or("video/mp4"),
            size_hint: candidate.size,
            folder: &folder,
            file_name: candidate.file_name.as_deref(),
        })?;
        Ok(key)
    }

    fn discard(&self, keys: &[&str]) {
        for key in keys {
            if let Err(error) = self.blobs.delete(key) {
                warn!(key = %key, error = %error, "failed to remove orphaned upload");
            } else {
                info!(key = %key, "removed upload after failed commit");
            }
        }
    }
}

/// Error raised by the video profile service.
#[derive(Debug, thiserror::Error)]
pub enum VideoProfileError {
    #[error("No active AI questions available")]
    NoQuestionsAvailable,
    #[error("Sitter {0} not found")]
    SitterNotFound(SitterId),
    #[error("AI question {0} not found or inactive")]
    QuestionNotFound(QuestionId),
    #[error("AI video profile for sitter {0} not found")]
    ProfileNotFound(SitterId),
    #[error("{file} is required and cannot be empty")]
    InvalidFile { file: &'static str },
    #[error("{file} exceeds maximum file size of {} MB", .limit_bytes / MIB)]
    FileTooLarge {
        file: &'static str,
        limit_bytes: u64,
        actual_bytes: u64,
    },
    #[error("{file} is not a valid video file")]
    InvalidFileType {
        file: &'static str,
        content_type: String,
    },
    #[error("{file} exceeds maximum duration of {limit_seconds} seconds (actual: {actual_seconds} seconds)")]
    DurationExceeded {
        file: &'static str,
        limit_seconds: u32,
        actual_seconds: u64,
    },
    #[error("Invalid status '{0}'; expected one of PENDING, ACTIVE, INACTIVE, REVIEWING")]
    InvalidStatus(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl VideoProfileError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoQuestionsAvailable => "NO_QUESTIONS_AVAILABLE",
            Self::SitterNotFound(_) => "SITTER_NOT_FOUND",
            Self::QuestionNotFound(_) => "AI_QUESTION_NOT_FOUND",
            Self::ProfileNotFound(_) => "PROFILE_NOT_FOUND",
            Self::InvalidFile { .. } => "INVALID_FILE",
            Self::FileTooLarge { .. } => "FILE_SIZE_EXCEEDED",
            Self::InvalidFileType { .. } => "INVALID_FILE_TYPE",
            Self::DurationExceeded { .. } => "VIDEO_DURATION_EXCEEDED",
            Self::InvalidStatus(_) => "INVALID_STATUS",
            Self::Repository(_) | Self::Storage(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl From<NoQuestionsAvailable> for VideoProfileError {
    fn from(_: NoQuestionsAvailable) -> Self {
        Self::NoQuestionsAvailable
    }
}
