use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::response::Response;
use axum::{Extension, Router};
use bytes::Bytes;
use serde_json::Value;

use crate::auth::{JwtVerifier, UserRole};
use crate::sitters::domain::{Sitter, SitterId};
use crate::sitters::questions::{
    DifficultyLevel, InterviewQuestion, QuestionCategory, QuestionId, QuestionRepository,
};
use crate::sitters::repository::{RepositoryError, SitterRepository};
use crate::sitters::video::{
    video_profile_router, DurationProbe, UploadCandidate, VideoPolicyConfig, VideoProfile,
    VideoProfileRepository, VideoProfileService, VideoUploadRequest,
};
use crate::storage::{object_key, BlobStore, BlobUpload, StorageError};

pub(super) const SITTER: SitterId = SitterId(7);
pub(super) const ACTIVE_QUESTION: QuestionId = QuestionId(1);
pub(super) const INACTIVE_QUESTION: QuestionId = QuestionId(99);
pub(super) const JWT_SECRET: &str = "video-profile-tests";

#[derive(Default)]
struct StoreState {
    sitters: HashMap<SitterId, Sitter>,
    questions: BTreeMap<QuestionId, InterviewQuestion>,
    profiles: HashMap<SitterId, VideoProfile>,
}

#[derive(Default)]
pub(super) struct MemoryStore {
    state: Mutex<StoreState>,
    fail_commits: AtomicBool,
}

impl MemoryStore {
    pub(super) fn seeded() -> Self {
        let store = Self::default();
        store.add_sitter(SITTER);
        let mut inactive = InterviewQuestion::new(
            INACTIVE_QUESTION,
            "Retired question",
            QuestionCategory::Experience,
            DifficultyLevel::Easy,
        );
        inactive.active = false;
        store.add_question(InterviewQuestion::new(
            ACTIVE_QUESTION,
            "Why do you enjoy caring for children?",
            QuestionCategory::Motivation,
            DifficultyLevel::Easy,
        ));
        store.add_question(inactive);
        store
    }

    pub(super) fn add_sitter(&self, id: SitterId) {
        let mut state = self.state.lock().expect("store mutex poisoned");
        state.sitters.insert(
            id,
            Sitter {
                id,
                email: format!("sitter{id}@babyon.test"),
                display_name: format!("Sitter {id}"),
            },
        );
    }

    pub(super) fn add_question(&self, question: InterviewQuestion) {
        let mut state = self.state.lock().expect("store mutex poisoned");
        state.questions.insert(question.id, question);
    }

    pub(super) fn fail_commits(&self) {
        self.fail_commits.store(true, Ordering::SeqCst);
    }

    pub(super) fn usage(&self, id: QuestionId) -> u64 {
        let state = self.state.lock().expect("store mutex poisoned");
        state.questions.get(&id).map_or(0, |question| question.usage_count)
    }

    pub(super) fn profile_count(&self) -> usize {
        self.state.lock().expect("store mutex poisoned").profiles.len()
    }
}

impl SitterRepository for MemoryStore {
    fn find_sitter(&self, id: SitterId) -> Result<Option<Sitter>, RepositoryError> {
        let state = self.state.lock().expect("store mutex poisoned");
        Ok(state.sitters.get(&id).cloned())
    }
}

impl QuestionRepository for MemoryStore {
    fn active_by_usage(&self) -> Result<Vec<InterviewQuestion>, RepositoryError> {
        let state = self.state.lock().expect("store mutex poisoned");
        let mut active: Vec<_> = state
            .questions
            .values()
            .filter(|question| question.active)
            .cloned()
            .collect();
        active.sort_by_key(|question| question.usage_count);
        Ok(active)
    }

    fn find_active(&self, id: QuestionId) -> Result<Option<InterviewQuestion>, RepositoryError> {
        Ok(self.find(id)?.filter(|question| question.active))
    }

    fn find(&self, id: QuestionId) -> Result<Option<InterviewQuestion>, RepositoryError> {
        let state = self.state.lock().expect("store mutex poisoned");
        Ok(state.questions.get(&id).cloned())
    }
}

impl VideoProfileRepository for MemoryStore {
    fn find_by_sitter(&self, sitter_id: SitterId) -> Result<Option<VideoProfile>, RepositoryError> {
        let state = self.state.lock().expect("store mutex poisoned");
        Ok(state.profiles.get(&sitter_id).cloned())
    }

    fn commit_upload(&self, profile: VideoProfile) -> Result<VideoProfile, RepositoryError> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("database offline".to_string()));
        }
        let mut state = self.state.lock().expect("store mutex poisoned");
        let question = state
            .questions
            .get_mut(&profile.question_id)
            .ok_or(RepositoryError::NotFound)?;
        question.usage_count += 1;
        state.profiles.insert(profile.sitter_id, profile.clone());
        Ok(profile)
    }
}

#[derive(Default)]
pub(super) struct MemoryBlobs {
    objects: Mutex<HashMap<String, Bytes>>,
    deleted: Mutex<Vec<String>>,
}

impl MemoryBlobs {
    pub(super) fn keys(&self) -> Vec<String> {
        let objects = self.objects.lock().expect("blob mutex poisoned");
        let mut keys: Vec<_> = objects.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub(super) fn deleted(&self) -> Vec<String> {
        self.deleted.lock().expect("blob mutex poisoned").clone()
    }
}

impl BlobStore for MemoryBlobs {
    fn put(&self, upload: BlobUpload<'_>) -> Result<String, StorageError> {
        let key = object_key(upload.folder, upload.file_name);
        self.objects
            .lock()
            .expect("blob mutex poisoned")
            .insert(key.clone(), upload.data.clone());
        Ok(key)
    }

    fn presign_read(&self, key: &str, ttl: Duration) -> Result<String, StorageError> {
        let objects = self.objects.lock().expect("blob mutex poisoned");
        if !objects.contains_key(key) {
            return Err(StorageError::NotFound(key.to_string()));
        }
        Ok(format!("memory://test-bucket/{key}?expires={}", ttl.as_secs()))
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.objects.lock().expect("blob mutex poisoned").remove(key);
        self.deleted
            .lock()
            .expect("blob mutex poisoned")
            .push(key.to_string());
        Ok(())
    }
}

/// Accepts the first write and fails every later one.
#[derive(Default)]
pub(super) struct FlakyBlobs {
    inner: MemoryBlobs,
    writes: Mutex<usize>,
}

impl FlakyBlobs {
    pub(super) fn inner(&self) -> &MemoryBlobs {
        &self.inner
    }
}

impl BlobStore for FlakyBlobs {
    fn put(&self, upload: BlobUpload<'_>) -> Result<String, StorageError> {
        let mut writes = self.writes.lock().expect("blob mutex poisoned");
        *writes += 1;
        if *writes > 1 {
            return Err(StorageError::Unavailable("bucket throttled".to_string()));
        }
        self.inner.put(upload)
    }

    fn presign_read(&self, key: &str, ttl: Duration) -> Result<String, StorageError> {
        self.inner.presign_read(key, ttl)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.inner.delete(key)
    }
}

pub(super) struct FixedProbe(pub u32);

impl DurationProbe for FixedProbe {
    fn probe(&self, _candidate: &UploadCandidate) -> Option<u32> {
        Some(self.0)
    }
}

pub(super) fn mib(count: u64) -> u64 {
    count * 1024 * 1024
}

/// Candidate with a declared size; the payload stays tiny so large sizes cost nothing.
pub(super) fn candidate(size: u64, content_type: &str) -> UploadCandidate {
    UploadCandidate {
        file_name: Some("clip.mp4".to_string()),
        content_type: Some(content_type.to_string()),
        size,
        data: Bytes::from_static(b"\x00\x00\x00\x18ftypmp42"),
    }
}

pub(super) fn valid_request() -> VideoUploadRequest {
    VideoUploadRequest {
        intro: Some(candidate(mib(2), "video/mp4")),
        answer: Some(candidate(mib(5), "video/webm")),
        question_id: ACTIVE_QUESTION,
        status: None,
    }
}

pub(super) fn build_service() -> (
    VideoProfileService<MemoryStore, MemoryBlobs>,
    Arc<MemoryStore>,
    Arc<MemoryBlobs>,
) {
    let store = Arc::new(MemoryStore::seeded());
    let blobs = Arc::new(MemoryBlobs::default());
    let service =
        VideoProfileService::new(store.clone(), blobs.clone(), VideoPolicyConfig::default());
    (service, store, blobs)
}

pub(super) fn router_with_service(
    service: VideoProfileService<MemoryStore, MemoryBlobs>,
) -> Router {
    video_profile_router(Arc::new(service))
        .layer(Extension(Arc::new(JwtVerifier::new(JWT_SECRET))))
}

pub(super) fn token(user_id: u64, role: UserRole) -> String {
    JwtVerifier::new(JWT_SECRET)
        .issue(
            user_id,
            "tester@babyon.test",
            role,
            chrono::Duration::minutes(10),
        )
        .expect("token issued")
}

pub(super) const BOUNDARY: &str = "babyon-test-boundary";

pub(super) enum FormPart {
    Text(&'static str, String),
    File {
        name: &'static str,
        file_name: &'static str,
        content_type: &'static str,
        body: Vec<u8>,
    },
}

pub(super) fn video_part(name: &'static str, content_type: &'static str, len: usize) -> FormPart {
    FormPart::File {
        name,
        file_name: "clip.mp4",
        content_type,
        body: vec![0x42; len],
    }
}

pub(super) fn multipart_body(parts: &[FormPart]) -> Body {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            FormPart::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            FormPart::File {
                name,
                file_name,
                content_type,
                body: bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    Body::from(body)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("valid json")
}
