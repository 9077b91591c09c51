use tracing::debug;

use super::config::{VideoPolicyConfig, MIB};
use super::domain::{UploadCandidate, VideoSlot};
use super::service::VideoProfileError;

/// Source of a clip's real running time. `None` means the duration could not be read.
pub trait DurationProbe: Send + Sync {
    fn probe(&self, candidate: &UploadCandidate) -> Option<u32>;
}

/// Probe used until a media decoder is wired in.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableDurationProbe;

impl DurationProbe for UnavailableDurationProbe {
    fn probe(&self, _candidate: &UploadCandidate) -> Option<u32> {
        None
    }
}

/// Structural and duration screening for uploaded clips.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    config: VideoPolicyConfig,
}

impl UploadPolicy {
    pub fn new(config: VideoPolicyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VideoPolicyConfig {
        &self.config
    }

    /// Presence, size and media type checks for one slot.
    pub fn check_file<'a>(
        &self,
        slot: VideoSlot,
        candidate: Option<&'a UploadCandidate>,
    ) -> Result<&'a UploadCandidate, VideoProfileError> {
        let file = slot.label();
        let candidate = candidate
            .filter(|candidate| candidate.size > 0)
            .ok_or(VideoProfileError::InvalidFile { file })?;

        if candidate.size > self.config.max_file_size_bytes {
            return Err(VideoProfileError::FileTooLarge {
                file,
                limit_bytes: self.config.max_file_size_bytes,
                actual_bytes: candidate.size,
            });
        }

        if !is_video(candidate.content_type.as_deref()) {
            return Err(VideoProfileError::InvalidFileType {
                file,
                content_type: candidate.content_type.clone().unwrap_or_default(),
            });
        }

        Ok(candidate)
    }

    /// Applies the duration limit. Returns the probed duration when one was available so it
    /// can be stored; an estimate only screens and is never returned.
    pub fn check_duration(
        &self,
        slot: VideoSlot,
        candidate: &UploadCandidate,
        probe: &dyn DurationProbe,
    ) -> Result<Option<u32>, VideoProfileError> {
        let probed = probe.probe(candidate);
        let effective = match probed {
            Some(seconds) => u64::from(seconds),
            None => {
                let estimate = self.estimate_duration_seconds(candidate.size);
                debug!(
                    file = slot.label(),
                    size_bytes = candidate.size,
                    estimate_seconds = estimate,
                    "duration unavailable; screening with size estimate"
                );
                estimate
            }
        };

        if effective > u64::from(self.config.max_duration_seconds) {
            return Err(VideoProfileError::DurationExceeded {
                file: slot.label(),
                limit_seconds: self.config.max_duration_seconds,
                actual_seconds: effective,
            });
        }

        Ok(probed)
    }

    /// Upper-bound running time for a file of `size_bytes`, rounded up to whole seconds.
    pub fn estimate_duration_seconds(&self, size_bytes: u64) -> u64 {
        size_bytes
            .saturating_mul(u64::from(self.config.estimated_seconds_per_mib))
            .div_ceil(MIB)
    }
}

fn is_video(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|raw| raw.parse::<mime::Mime>().ok())
        .map(|parsed| parsed.type_() == mime::VIDEO)
        .unwrap_or(false)
}
