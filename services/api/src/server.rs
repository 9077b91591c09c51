use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use babyon::auth::JwtVerifier;
use babyon::config::{AppConfig, CorsConfig};
use babyon::error::AppError;
use babyon::sitters::profile::SitterProfileService;
use babyon::sitters::video::VideoProfileService;
use babyon::telemetry;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::{demo_sitters, load_question_bank, AppState, InMemoryBlobStore, InMemoryStore};
use crate::routes::application_routes;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let questions = load_question_bank(args.questions.as_deref())?;
    let question_count = questions.len();
    let store = Arc::new(InMemoryStore::seeded(questions, demo_sitters()));
    let blobs = Arc::new(InMemoryBlobStore::new(config.storage.bucket.clone()));
    let video_service = Arc::new(VideoProfileService::new(
        store.clone(),
        blobs,
        config.video.clone(),
    ));
    let profile_service = Arc::new(SitterProfileService::new(store));
    let verifier = Arc::new(JwtVerifier::new(&config.auth.jwt_secret));

    let app = application_routes(video_service, profile_service)
        .layer(Extension(app_state))
        .layer(Extension(verifier))
        .layer(cors_layer(&config.cors))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        questions = question_count,
        max_file_size_bytes = config.video.max_file_size_bytes,
        "babyon api ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let cors = config.clone();
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _request| {
                origin
                    .to_str()
                    .map(|origin| cors.allows(origin))
                    .unwrap_or(false)
            },
        ))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers([header::AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(60 * 60))
}
