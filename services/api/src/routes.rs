use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use babyon::sitters::profile::{sitter_profile_router, SitterProfileService};
use babyon::sitters::video::{video_profile_router, VideoProfileService};
use serde_json::json;

use crate::infra::{AppState, InMemoryBlobStore, InMemoryStore};

pub(crate) fn application_routes(
    videos: Arc<VideoProfileService<InMemoryStore, InMemoryBlobStore>>,
    profiles: Arc<SitterProfileService<InMemoryStore>>,
) -> Router {
    video_profile_router(videos)
        .merge(sitter_profile_router(profiles))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use axum::body::Body;
    use axum::http::Request;
    use babyon::auth::{JwtVerifier, UserRole};
    use babyon::sitters::questions::default_question_bank;
    use babyon::sitters::video::VideoPolicyConfig;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use tower::ServiceExt;

    use super::*;
    use crate::infra::demo_sitters;

    fn app(ready: bool) -> Router {
        let store = Arc::new(InMemoryStore::seeded(default_question_bank(), demo_sitters()));
        let blobs = Arc::new(InMemoryBlobStore::new("test-bucket"));
        let videos = Arc::new(VideoProfileService::new(
            store.clone(),
            blobs,
            VideoPolicyConfig::default(),
        ));
        let profiles = Arc::new(SitterProfileService::new(store));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        application_routes(videos, profiles)
            .layer(Extension(state))
            .layer(Extension(Arc::new(JwtVerifier::new("routes-test"))))
    }

    async fn status_of(router: Router, uri: &str) -> StatusCode {
        router
            .oneshot(Request::get(uri).body(Body::empty()).expect("request builds"))
            .await
            .expect("route executes")
            .status()
    }

    #[tokio::test]
    async fn readiness_tracks_the_flag() {
        assert_eq!(status_of(app(false), "/ready").await, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(status_of(app(true), "/ready").await, StatusCode::OK);
        assert_eq!(status_of(app(true), "/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn domain_routes_are_mounted() {
        assert_eq!(
            status_of(app(true), "/api/v1/sitter/ai-question/random").await,
            StatusCode::OK
        );
        assert_eq!(
            status_of(app(true), "/api/v1/sitter-profiles/1").await,
            StatusCode::OK
        );
        assert_eq!(
            status_of(app(true), "/api/v1/sitter/ai-profile/1").await,
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn sitter_routes_read_the_installed_verifier() {
        let token = JwtVerifier::new("routes-test")
            .issue(2, "sitter2@babyon.dev", UserRole::Sitter, chrono::Duration::minutes(5))
            .expect("token issued");
        let response = app(true)
            .oneshot(
                Request::get("/api/v1/sitter/ai-profile/me/exists")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
