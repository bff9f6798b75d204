use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::ApiError;
use crate::{adapters::inbound::http::ProviderAccommodationResponse, app_state::AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/:provider_id/accommodation", get(provider_accommodation))
}

#[instrument(name = "GET /api/service-providers/:provider_id/accommodation", skip(app_state))]
async fn provider_accommodation(
    State(app_state): State<AppState>,
    Path(provider_id): Path<String>,
) -> Result<Json<ProviderAccommodationResponse>, ApiError> {
    let provider_id = provider_id.trim();
    if provider_id.is_empty() {
        return Err(ApiError::bad_request("Provider id is required"));
    }

    let results = app_state
        .directory
        .provider_accommodation(provider_id)
        .await;
    Ok(Json(results.into()))
}
