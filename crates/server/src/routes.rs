pub mod active;
pub mod banners;

use axum::{response::IntoResponse, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::{metrics, openapi::ApiDoc, state::ServerState};

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics_text() -> impl IntoResponse {
    metrics::encode_metrics()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: storefront read, admin CRUD and ops endpoints.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        .route("/api-docs/openapi.json", get(openapi_json));

    // Storefront
    let public = Router::new().route("/api/banners/active", get(active::get_active));

    // Admin
    let admin = Router::new()
        .route("/admin/banners", get(banners::list).post(banners::create))
        .route(
            "/admin/banners/:id",
            get(banners::get)
                .put(banners::replace)
                .patch(banners::patch)
                .delete(banners::delete),
        );

    ops.merge(public)
        .merge(admin)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request with method and path
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx and friends
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
