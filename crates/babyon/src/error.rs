use crate::auth::AuthError;
use crate::config::ConfigError;
use crate::sitters::profile::SitterProfileError;
use crate::sitters::questions::QuestionImportError;
use crate::sitters::video::VideoProfileError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Failures raised while booting the service or running CLI commands.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    QuestionImport(QuestionImportError),
    Auth(AuthError),
    VideoProfile(VideoProfileError),
    SitterProfile(SitterProfileError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::QuestionImport(err) => write!(f, "question bank error: {}", err),
            AppError::Auth(err) => write!(f, "auth error: {}", err),
            AppError::VideoProfile(err) => write!(f, "video profile error: {}", err),
            AppError::SitterProfile(err) => write!(f, "sitter profile error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::QuestionImport(err) => Some(err),
            AppError::Auth(err) => Some(err),
            AppError::VideoProfile(err) => Some(err),
            AppError::SitterProfile(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<QuestionImportError> for AppError {
    fn from(value: QuestionImportError) -> Self {
        Self::QuestionImport(value)
    }
}

impl From<AuthError> for AppError {
    fn from(value: AuthError) -> Self {
        Self::Auth(value)
    }
}

impl From<VideoProfileError> for AppError {
    fn from(value: VideoProfileError) -> Self {
        Self::VideoProfile(value)
    }
}

impl From<SitterProfileError> for AppError {
    fn from(value: SitterProfileError) -> Self {
        Self::SitterProfile(value)
    }
}

/// JSON body returned by every failing API call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error_code: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorBody {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_code: error_code.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

pub fn error_response(
    status: StatusCode,
    error_code: &str,
    message: impl Into<String>,
) -> Response {
    (status, Json(ErrorBody::new(error_code, message))).into_response()
}

/// Renders an extractor rejection (path, query, JSON body) in the shared error body.
pub(crate) fn rejection_response(status: StatusCode, message: String) -> Response {
    error_response(status, "VALIDATION_FAILED", message)
}

pub(crate) const INTERNAL_ERROR_MESSAGE: &str =
    "An unexpected server error occurred. Please try again shortly.";

pub(crate) fn internal_error_response() -> Response {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_SERVER_ERROR",
        INTERNAL_ERROR_MESSAGE,
    )
}
