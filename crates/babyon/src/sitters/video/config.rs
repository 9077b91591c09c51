use std::time::Duration;

pub const MIB: u64 = 1024 * 1024;

/// Limits applied to AI video resume uploads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoPolicyConfig {
    pub max_duration_seconds: u32,
    pub max_file_size_bytes: u64,
    /// How many of the least used questions random selection draws from.
    pub question_sample_size: usize,
    /// Pessimistic seconds of footage assumed per MiB when no real duration is known.
    pub estimated_seconds_per_mib: u32,
    pub presigned_url_ttl: Duration,
}

impl VideoPolicyConfig {
    /// Request body cap for the upload route: two files plus form overhead.
    pub fn upload_body_limit(&self) -> usize {
        let limit = self
            .max_file_size_bytes
            .saturating_mul(2)
            .saturating_add(MIB);
        usize::try_from(limit).unwrap_or(usize::MAX)
    }
}

impl Default for VideoPolicyConfig {
    fn default() -> Self {
        Self {
            max_duration_seconds: 120,
            max_file_size_bytes: 100 * MIB,
            question_sample_size: 10,
            estimated_seconds_per_mib: 10,
            presigned_url_ttl: Duration::from_secs(60 * 60),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_limit_fits_two_maximal_files() {
        let config = VideoPolicyConfig::default();
        assert_eq!(config.upload_body_limit() as u64, 201 * MIB);
    }
}
