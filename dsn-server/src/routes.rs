use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use dsn_backend::module::dsn::DsnPipeline;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::cache::SnapshotCache;

const ROOT_TEXT: &str = "NASA Deep Space Network API. GET /api/dsn for data.";

pub struct AppState {
    pub pipeline: DsnPipeline,
    pub cache: SnapshotCache,
}

pub fn build_router(state: Arc<AppState>, images_dir: impl AsRef<Path>, enable_cors: bool) -> Router {
    let router = Router::new()
        .route("/", get(root))
        .route("/up", get(up))
        .route("/api/dsn", get(dsn_snapshot))
        .nest_service("/images", ServeDir::new(images_dir.as_ref()))
        .with_state(state);

    let router = if enable_cors {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    };

    router.layer(TraceLayer::new_for_http())
}

async fn root() -> &'static str {
    ROOT_TEXT
}

/// Liveness probe
async fn up() -> &'static str {
    "ok"
}

/// Serve the cached snapshot, refreshing it when stale.
///
/// The cache lock is not held across the fetch, so two requests that miss
/// at the same time will both hit the feeds.
async fn dsn_snapshot(State(state): State<Arc<AppState>>) -> Response {
    if let Some(body) = state.cache.fresh().await {
        return json_response(body);
    }

    let snapshot = match state.pipeline.fetch_snapshot().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!("Error fetching DSN data: {}", e);
            let status = if e.is_upstream() {
                StatusCode::BAD_GATEWAY
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            return (status, "error fetching DSN data").into_response();
        }
    };

    let body = match snapshot.to_json() {
        Ok(body) => Bytes::from(body),
        Err(e) => {
            tracing::error!("Error encoding DSN data: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "error encoding DSN data").into_response();
        }
    };

    state.cache.store(body.clone()).await;
    json_response(body)
}

fn json_response(body: Bytes) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}
