use axum::{routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::metrics;
use crate::state::ServerState;

pub mod resources;

/// Liveness check; never touches storage.
pub async fn health() -> &'static str {
    "OK"
}

async fn metrics_handler() -> (axum::http::StatusCode, String) {
    metrics::encode_metrics()
}

/// Build the full application router: health, metrics, and one CRUD route
/// set per resource kind.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let mut app = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler));

    for manager in state.managers() {
        app = app.merge(resources::resource_routes(manager.clone()));
    }

    app.layer(cors).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
            // 5xx responses are logged at ERROR
            .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
    )
}
