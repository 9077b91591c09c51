//! AI video resumes: a sitter records an intro clip and an answer to an assigned interview
//! question. Uploads are screened by [`UploadPolicy`] before anything is stored, and the
//! profile upsert commits together with the question's usage counter.

pub mod config;
pub mod domain;
pub mod policy;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use config::VideoPolicyConfig;
pub use domain::{
    ProfileStatus, UploadCandidate, VideoProfile, VideoProfileView, VideoSlot, VideoUploadRequest,
};
pub use policy::{DurationProbe, UnavailableDurationProbe, UploadPolicy};
pub use repository::VideoProfileRepository;
pub use router::video_profile_router;
pub use service::{VideoProfileError, VideoProfileService};
