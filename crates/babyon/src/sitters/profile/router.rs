use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::error;

use super::domain::SitterProfileUpdate;
use super::repository::SitterProfileRepository;
use super::search::SitterSearch;
use super::service::{SitterProfileError, SitterProfileService};
use crate::auth::{AuthError, AuthenticatedSitter};
use crate::error::{error_response, internal_error_response, rejection_response};
use crate::sitters::domain::SitterId;

pub fn sitter_profile_router<R>(service: Arc<SitterProfileService<R>>) -> Router
where
    R: SitterProfileRepository + 'static,
{
    Router::new()
        .route("/api/v1/sitter-profiles/search", get(search_handler::<R>))
        .route(
            "/api/v1/sitter-profiles/:sitter_id",
            get(profile_handler::<R>).put(update_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn search_handler<R>(
    State(service): State<Arc<SitterProfileService<R>>>,
    search: Result<Query<SitterSearch>, QueryRejection>,
) -> Response
where
    R: SitterProfileRepository + 'static,
{
    let Query(search) = match search {
        Ok(query) => query,
        Err(rejection) => return rejection_response(rejection.status(), rejection.body_text()),
    };
    match service.search(&search) {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(error) => error_into_response(error),
    }
}

pub(crate) async fn profile_handler<R>(
    State(service): State<Arc<SitterProfileService<R>>>,
    sitter_id: Result<Path<u64>, PathRejection>,
) -> Response
where
    R: SitterProfileRepository + 'static,
{
    let Path(sitter_id) = match sitter_id {
        Ok(path) => path,
        Err(rejection) => return rejection_response(rejection.status(), rejection.body_text()),
    };
    match service.get_or_create(SitterId(sitter_id)) {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(error) => error_into_response(error),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<SitterProfileService<R>>>,
    AuthenticatedSitter(caller): AuthenticatedSitter,
    sitter_id: Result<Path<u64>, PathRejection>,
    update: Result<Json<SitterProfileUpdate>, JsonRejection>,
) -> Response
where
    R: SitterProfileRepository + 'static,
{
    let Path(sitter_id) = match sitter_id {
        Ok(path) => path,
        Err(rejection) => return rejection_response(rejection.status(), rejection.body_text()),
    };
    let sitter_id = SitterId(sitter_id);
    if caller != sitter_id {
        return AuthError::Forbidden("You can only update your own profile".to_string())
            .into_response();
    }

    let Json(update) = match update {
        Ok(body) => body,
        Err(rejection) => return rejection_response(rejection.status(), rejection.body_text()),
    };

    match service.update(sitter_id, update) {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(error) => error_into_response(error),
    }
}

fn error_into_response(error: SitterProfileError) -> Response {
    match &error {
        SitterProfileError::SitterNotFound(_) => {
            error_response(StatusCode::NOT_FOUND, error.error_code(), error.to_string())
        }
        SitterProfileError::Repository(_) => {
            error!(error = %error, "sitter profile request failed");
            internal_error_response()
        }
    }
}
