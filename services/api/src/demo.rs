use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use babyon::error::AppError;
use babyon::sitters::profile::{
    AgeGroup, ServiceArea, ServiceType, SitterProfileService, SitterProfileUpdate,
};
use babyon::sitters::video::{
    UploadCandidate, VideoPolicyConfig, VideoProfileService, VideoUploadRequest,
};
use babyon::sitters::SitterId;
use clap::Args;

use crate::infra::{demo_sitters, load_question_bank, InMemoryBlobStore, InMemoryStore};

const DEMO_SITTER: SitterId = SitterId(1);
const SYNTHETIC_CLIP_BYTES: usize = 512 * 1024;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Intro clip to upload. A synthetic clip is used when omitted.
    #[arg(long)]
    pub(crate) intro: Option<PathBuf>,
    /// Answer clip to upload. A synthetic clip is used when omitted.
    #[arg(long)]
    pub(crate) answer: Option<PathBuf>,
    /// CSV question bank to seed instead of the built-in questions
    #[arg(long)]
    pub(crate) questions: Option<PathBuf>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        intro,
        answer,
        questions,
    } = args;

    let bank = load_question_bank(questions.as_deref())?;
    let store = Arc::new(InMemoryStore::seeded(bank, demo_sitters()));
    let blobs = Arc::new(InMemoryBlobStore::new("babyon-demo"));
    let videos = VideoProfileService::new(store.clone(), blobs.clone(), VideoPolicyConfig::default());
    let profiles = SitterProfileService::new(store.clone());

    println!("Babyon AI video resume demo");

    let question = videos.random_question()?;
    println!(
        "\nAssigned question #{} [{} / {}] ({}s limit)\n  {}",
        question.question_id,
        question.question_category,
        question.difficulty_level,
        question.time_limit_seconds,
        question.question_text
    );

    let intro = load_clip(intro.as_deref(), "intro-demo.mp4")?;
    let answer = load_clip(answer.as_deref(), "answer-demo.mp4")?;
    println!(
        "\nUploading intro ({} bytes, {}) and answer ({} bytes, {})",
        intro.size,
        intro.content_type.as_deref().unwrap_or("unknown"),
        answer.size,
        answer.content_type.as_deref().unwrap_or("unknown"),
    );

    videos.upload_or_update(
        DEMO_SITTER,
        VideoUploadRequest {
            intro: Some(intro),
            answer: Some(answer),
            question_id: question.question_id,
            status: None,
        },
    )?;
    let view = videos.get_profile(DEMO_SITTER)?;
    println!("\nVideo profile for sitter {}", view.sitter_id);
    println!("  status: {}", view.status);
    println!("  intro:  {}", view.intro_video_url);
    println!("  answer: {}", view.answer_video_url);
    println!(
        "  durations: intro {}, answer {}",
        describe_duration(view.intro_duration_seconds),
        describe_duration(view.answer_duration_seconds)
    );
    println!("  stored objects: {}", blobs.object_count());

    println!("\nQuestion usage after upload");
    for question in store.questions().iter().filter(|question| question.usage_count > 0) {
        println!(
            "  #{} {} -> {}",
            question.id,
            question.category.label(),
            question.usage_count
        );
    }

    let before = profiles.get_or_create(DEMO_SITTER)?;
    let after = profiles.update(
        DEMO_SITTER,
        SitterProfileUpdate {
            introduction: Some("Early-childhood educator who loves outdoor play.".to_string()),
            available_service_types: vec![ServiceType::ShortTerm, ServiceType::PickupDropoff],
            preferred_age_groups: vec![AgeGroup::Toddler, AgeGroup::Preschool],
            languages_spoken: vec!["Korean".to_string(), "English".to_string()],
            service_areas: vec![ServiceArea {
                city: "Seoul".to_string(),
                district: "Mapo-gu".to_string(),
            }],
            hourly_rate: Some(15_000),
            ..SitterProfileUpdate::default()
        },
    )?;
    println!(
        "\nProfile completeness: {} -> {}",
        before.profile_completed, after.profile_completed
    );

    Ok(())
}

fn load_clip(path: Option<&Path>, synthetic_name: &str) -> Result<UploadCandidate, AppError> {
    let Some(path) = path else {
        return Ok(UploadCandidate::from_bytes(
            Some(synthetic_name.to_string()),
            Some("video/mp4".to_string()),
            vec![0u8; SYNTHETIC_CLIP_BYTES],
        ));
    };

    let data = fs::read(path)?;
    let content_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string);
    Ok(UploadCandidate::from_bytes(file_name, Some(content_type), data))
}

fn describe_duration(seconds: Option<u32>) -> String {
    seconds.map_or_else(|| "unknown".to_string(), |seconds| format!("{seconds}s"))
}
