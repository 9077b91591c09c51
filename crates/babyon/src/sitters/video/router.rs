use std::sync::Arc;

use axum::{
    extract::{
        multipart::MultipartError, rejection::PathRejection, DefaultBodyLimit, Multipart, Path,
        State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde_json::json;
use tracing::error;

use super::domain::{UploadCandidate, VideoUploadRequest};
use super::repository::VideoProfileRepository;
use super::service::{VideoProfileError, VideoProfileService};
use crate::auth::AuthenticatedSitter;
use crate::error::{error_response, internal_error_response, rejection_response};
use crate::sitters::domain::SitterId;
use crate::sitters::questions::QuestionId;
use crate::storage::BlobStore;

/// Router exposing question hand-out and the AI video resume endpoints.
pub fn video_profile_router<R, B>(service: Arc<VideoProfileService<R, B>>) -> Router
where
    R: VideoProfileRepository + 'static,
    B: BlobStore + 'static,
{
    let body_limit = service.config().upload_body_limit();
    Router::new()
        .route(
            "/api/v1/sitter/ai-question/random",
            get(random_question_handler::<R, B>),
        )
        .route(
            "/api/v1/sitter/ai-profile",
            put(upload_handler::<R, B>).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/api/v1/sitter/ai-profile/me", get(my_profile_handler::<R, B>))
        .route(
            "/api/v1/sitter/ai-profile/me/exists",
            get(exists_handler::<R, B>),
        )
        .route(
            "/api/v1/sitter/ai-profile/:sitter_id",
            get(profile_handler::<R, B>),
        )
        .with_state(service)
}

pub(crate) async fn random_question_handler<R, B>(
    State(service): State<Arc<VideoProfileService<R, B>>>,
) -> Response
where
    R: VideoProfileRepository + 'static,
    B: BlobStore + 'static,
{
    match service.random_question() {
        Ok(question) => (StatusCode::OK, Json(question)).into_response(),
        Err(error) => error_into_response(error),
    }
}

pub(crate) async fn upload_handler<R, B>(
    State(service): State<Arc<VideoProfileService<R, B>>>,
    AuthenticatedSitter(sitter_id): AuthenticatedSitter,
    multipart: Multipart,
) -> Response
where
    R: VideoProfileRepository + 'static,
    B: BlobStore + 'static,
{
    let request = match read_upload_form(multipart).await {
        Ok(request) => request,
        Err(response) => return response,
    };

    let result = service
        .upload_or_update(sitter_id, request)
        .and_then(|profile| service.render(&profile));
    match result {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_into_response(error),
    }
}

pub(crate) async fn my_profile_handler<R, B>(
    State(service): State<Arc<VideoProfileService<R, B>>>,
    AuthenticatedSitter(sitter_id): AuthenticatedSitter,
) -> Response
where
    R: VideoProfileRepository + 'static,
    B: BlobStore + 'static,
{
    match service.get_profile(sitter_id) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_into_response(error),
    }
}

pub(crate) async fn exists_handler<R, B>(
    State(service): State<Arc<VideoProfileService<R, B>>>,
    AuthenticatedSitter(sitter_id): AuthenticatedSitter,
) -> Response
where
    R: VideoProfileRepository + 'static,
    B: BlobStore + 'static,
{
    match service.has_profile(sitter_id) {
        Ok(exists) => {
            let payload = json!({
                "sitter_id": sitter_id,
                "exists": exists,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => error_into_response(error),
    }
}

pub(crate) async fn profile_handler<R, B>(
    State(service): State<Arc<VideoProfileService<R, B>>>,
    sitter_id: Result<Path<u64>, PathRejection>,
) -> Response
where
    R: VideoProfileRepository + 'static,
    B: BlobStore + 'static,
{
    let Path(sitter_id) = match sitter_id {
        Ok(path) => path,
        Err(rejection) => return rejection_response(rejection.status(), rejection.body_text()),
    };
    match service.get_profile(SitterId(sitter_id)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_into_response(error),
    }
}

async fn read_upload_form(mut multipart: Multipart) -> Result<VideoUploadRequest, Response> {
    let mut intro = None;
    let mut answer = None;
    let mut question_id = None;
    let mut status = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_rejection)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "introVideo" | "answerVideo" => {
                let file_name = field
                    .file_name()
                    .filter(|name| !name.is_empty())
                    .map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(multipart_rejection)?;
                let candidate = UploadCandidate::from_bytes(file_name, content_type, data);
                if name == "introVideo" {
                    intro = Some(candidate);
                } else {
                    answer = Some(candidate);
                }
            }
            "aiQuestionId" => {
                let raw = field.text().await.map_err(multipart_rejection)?;
                let parsed = raw.trim().parse::<u64>().ok().filter(|id| *id > 0);
                question_id = Some(parsed.ok_or_else(|| {
                    error_response(
                        StatusCode::BAD_REQUEST,
                        "VALIDATION_FAILED",
                        format!("aiQuestionId must be a positive integer, got '{}'", raw.trim()),
                    )
                })?);
            }
            "status" => {
                let raw = field.text().await.map_err(multipart_rejection)?;
                let raw = raw.trim();
                if !raw.is_empty() {
                    status = Some(raw.to_string());
                }
            }
            _ => {}
        }
    }

    let question_id = question_id.ok_or_else(|| {
        error_response(
            StatusCode::BAD_REQUEST,
            "VALIDATION_FAILED",
            "aiQuestionId is required",
        )
    })?;

    Ok(VideoUploadRequest {
        intro,
        answer,
        question_id: QuestionId(question_id),
        status,
    })
}

fn multipart_rejection(rejection: MultipartError) -> Response {
    let status = rejection.status();
    let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
        "FILE_SIZE_EXCEEDED"
    } else {
        "VALIDATION_FAILED"
    };
    error_response(status, code, rejection.body_text())
}

pub(crate) fn error_into_response(error: VideoProfileError) -> Response {
    let status = match &error {
        VideoProfileError::NoQuestionsAvailable
        | VideoProfileError::SitterNotFound(_)
        | VideoProfileError::QuestionNotFound(_)
        | VideoProfileError::ProfileNotFound(_) => StatusCode::NOT_FOUND,
        VideoProfileError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        VideoProfileError::InvalidFile { .. }
        | VideoProfileError::InvalidFileType { .. }
        | VideoProfileError::DurationExceeded { .. }
        | VideoProfileError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
        VideoProfileError::Repository(_) | VideoProfileError::Storage(_) => {
            error!(error = %error, "video profile request failed");
            return internal_error_response();
        }
    };
    error_response(status, error.error_code(), error.to_string())
}
