use std::any::Any;

use axum::{
    http::{HeaderValue, Method},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{
    app_state::AppState,
    routes::{self, ApiError},
};

pub fn create(app_state: AppState, app_url: &str) -> Router<()> {
    let app_url = app_url.to_string();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _| origin.as_bytes() == app_url.as_bytes(),
        ));

    Router::new()
        .route("/", get(|| async { "Street Support services API" }))
        .nest("/api/services", routes::services::router())
        .nest("/api/service-providers", routes::service_providers::router())
        .with_state(app_state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Request handler panicked: {}", detail);
    ApiError::unavailable().into_response()
}
