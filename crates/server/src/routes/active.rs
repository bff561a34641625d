use axum::{extract::State, Json};
use service::banner::ActiveBannerResponse;

use crate::{metrics, state::ServerState};

/// Storefront read. Always 200; storage trouble reads as "no banner".
#[utoipa::path(
    get, path = "/api/banners/active", tag = "storefront",
    responses(
        (status = 200, description = "The active banner, or null", body = crate::openapi::ActiveBannerDoc)
    )
)]
pub async fn get_active(State(state): State<ServerState>) -> Json<ActiveBannerResponse> {
    let read = state.active.read().await;
    metrics::record_active_read(read.outcome.as_str());
    Json(read.response)
}
