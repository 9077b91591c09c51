use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use babyon::error::AppError;
use babyon::sitters::profile::{SitterProfile, SitterProfileRepository};
use babyon::sitters::questions::{
    default_question_bank, load_questions_csv, InterviewQuestion, QuestionId, QuestionRepository,
};
use babyon::sitters::video::{VideoProfile, VideoProfileRepository};
use babyon::sitters::{RepositoryError, Sitter, SitterId, SitterRepository};
use babyon::storage::{object_key, BlobStore, BlobUpload, StorageError};
use bytes::Bytes;
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct StoreState {
    sitters: HashMap<SitterId, Sitter>,
    questions: BTreeMap<QuestionId, InterviewQuestion>,
    video_profiles: HashMap<SitterId, VideoProfile>,
    sitter_profiles: HashMap<SitterId, SitterProfile>,
}

/// Process-local stand-in for the relational store. A single lock makes every write,
/// including the profile upsert plus usage increment, one unit of work.
#[derive(Default, Clone)]
pub(crate) struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    pub(crate) fn seeded(questions: Vec<InterviewQuestion>, sitters: Vec<Sitter>) -> Self {
        let store = Self::default();
        {
            let mut state = store.state.lock().expect("store mutex poisoned");
            state.questions = questions
                .into_iter()
                .map(|question| (question.id, question))
                .collect();
            state.sitters = sitters
                .into_iter()
                .map(|sitter| (sitter.id, sitter))
                .collect();
        }
        store
    }

    pub(crate) fn questions(&self) -> Vec<InterviewQuestion> {
        let state = self.state.lock().expect("store mutex poisoned");
        state.questions.values().cloned().collect()
    }
}

impl SitterRepository for InMemoryStore {
    fn find_sitter(&self, id: SitterId) -> Result<Option<Sitter>, RepositoryError> {
        let state = self.state.lock().expect("store mutex poisoned");
        Ok(state.sitters.get(&id).cloned())
    }
}

impl QuestionRepository for InMemoryStore {
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

impl VideoProfileRepository for InMemoryStore {
    fn find_by_sitter(&self, sitter_id: SitterId) -> Result<Option<VideoProfile>, RepositoryError> {
        let state = self.state.lock().expect("store mutex poisoned");
        Ok(state.video_profiles.get(&sitter_id).cloned())
    }

    fn commit_upload(&self, profile: VideoProfile) -> Result<VideoProfile, RepositoryError> {
        let mut state = self.state.lock().expect("store mutex poisoned");
        let question = state
            .questions
            .get_mut(&profile.question_id)
            .ok_or(RepositoryError::NotFound)?;
        question.usage_count += 1;
        state
            .video_profiles
            .insert(profile.sitter_id, profile.clone());
        Ok(profile)
    }
}

impl SitterProfileRepository for InMemoryStore {
    fn find_profile(&self, sitter_id: SitterId) -> Result<Option<SitterProfile>, RepositoryError> {
        let state = self.state.lock().expect("store mutex poisoned");
        Ok(state.sitter_profiles.get(&sitter_id).cloned())
    }

    fn save_profile(&self, profile: SitterProfile) -> Result<SitterProfile, RepositoryError> {
        let mut state = self.state.lock().expect("store mutex poisoned");
        state
            .sitter_profiles
            .insert(profile.sitter_id, profile.clone());
        Ok(profile)
    }

    fn list_profiles(&self) -> Result<Vec<SitterProfile>, RepositoryError> {
        let state = self.state.lock().expect("store mutex poisoned");
        Ok(state.sitter_profiles.values().cloned().collect())
    }
}

/// Keeps uploaded media in memory and hands out `memory://` read URLs.
#[derive(Clone)]
pub(crate) struct InMemoryBlobStore {
    bucket: String,
    objects: Arc<Mutex<HashMap<String, (String, Bytes)>>>,
}

impl InMemoryBlobStore {
    pub(crate) fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: Arc::default(),
        }
    }

    pub(crate) fn object_count(&self) -> usize {
        self.objects.lock().expect("blob mutex poisoned").len()
    }
}

impl BlobStore for InMemoryBlobStore {
    fn put(&self, upload: BlobUpload<'_>) -> Result<String, StorageError> {
        let key = object_key(upload.folder, upload.file_name);
        let mut objects = self.objects.lock().expect("blob mutex poisoned");
        objects.insert(
            key.clone(),
            (upload.content_type.to_string(), upload.data.clone()),
        );
        Ok(key)
    }

    fn presign_read(&self, key: &str, ttl: Duration) -> Result<String, StorageError> {
        let objects = self.objects.lock().expect("blob mutex poisoned");
        if !objects.contains_key(key) {
            return Err(StorageError::NotFound(key.to_string()));
        }
        Ok(format!(
            "memory://{}/{key}?expires={}",
            self.bucket,
            ttl.as_secs()
        ))
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.objects
            .lock()
            .expect("blob mutex poisoned")
            .remove(key);
        Ok(())
    }
}

/// Reads the question bank from `path`, or falls back to the built-in bank.
pub(crate) fn load_question_bank(path: Option<&Path>) -> Result<Vec<InterviewQuestion>, AppError> {
    let Some(path) = path else {
        return Ok(default_question_bank());
    };
    let questions = load_questions_csv(File::open(path)?)?;
    info!(path = %path.display(), count = questions.len(), "loaded question bank");
    Ok(questions)
}

pub(crate) fn demo_sitters() -> Vec<Sitter> {
    [(1, "Jiwoo Park"), (2, "Minseo Kim"), (3, "Alex Chen")]
        .into_iter()
        .map(|(id, name)| Sitter {
            id: SitterId(id),
            email: format!("sitter{id}@babyon.dev"),
            display_name: name.to_string(),
        })
        .collect()
}
