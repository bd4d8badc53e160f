use axum::{
    extract::{OriginalUri, State},
    http::StatusCode,
    middleware,
    routing::get,
    Router,
};
use common::{metrics, types::Health};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{warn, Level};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::envelope::ApiEnvelope;
use crate::errors::ApiError;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod categories;

/// Liveness plus a database round-trip when one is configured.
#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse), (status = 503, description = "Database unreachable")))]
pub async fn health(State(state): State<ServerState>) -> ApiEnvelope<Health> {
    if let Some(db) = &state.db {
        if let Err(e) = models::db::test_connection(db).await {
            warn!(error = %e, "health check: database unreachable");
            return ApiEnvelope::new(StatusCode::SERVICE_UNAVAILABLE, "Database unreachable", Some(Health { status: "degraded" }));
        }
    }
    ApiEnvelope::ok("Service is healthy", Health { status: "ok" })
}

async fn prometheus_metrics() -> (StatusCode, String) {
    metrics::encode_metrics()
}

async fn not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Resource not found").at(uri.path())
}

/// Build the full application router: category API, health, metrics and docs
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(prometheus_metrics))
        .merge(categories::router())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn(metrics::track_requests))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request with method and path
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status code and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
