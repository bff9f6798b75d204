use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::ApiError;
use crate::{
    adapters::inbound::http::{ServicesQueryParams, ServicesResponse},
    app_state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(find_services))
}

#[instrument(name = "GET /api/services", skip(app_state))]
async fn find_services(
    State(app_state): State<AppState>,
    params: Result<Query<ServicesQueryParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let query = params.into_query()?;
    let result = app_state.directory.find_services(&query).await?;

    let headers = app_state.http_cache.headers(&result);
    Ok((headers, Json(ServicesResponse::from(result.page.as_ref()))))
}
