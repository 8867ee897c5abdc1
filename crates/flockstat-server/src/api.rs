use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use flockstat_core::build_series;
use flockstat_youtube::YoutubeClient;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId};

pub const DATA_PATH: &str = "/api/data";

#[derive(Clone)]
pub struct AppState {
    pub youtube: Arc<YoutubeClient>,
}

/// Failure body: `{"error": "<message>"}`, always sent with a 500.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}

pub fn build_app(state: AppState) -> Router {
    let data_route = get(get_data).layer(SetResponseHeaderLayer::overriding(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    ));

    Router::new()
        .route(DATA_PATH, data_route)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}

/// Fetches the channel's uploads and serves the day-indexed series.
///
/// Any upstream failure becomes a 500 with the error message; a partial
/// series is never served.
async fn get_data(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Response {
    match state.youtube.fetch_captioned_items().await {
        Ok(items) => {
            let series = build_series(&items);
            tracing::info!(
                request_id = %req_id.0,
                videos = items.len(),
                days = series.len(),
                "served series"
            );
            (StatusCode::OK, Json(series)).into_response()
        }
        Err(e) => {
            tracing::error!(request_id = %req_id.0, error = %e, "failed to fetch uploads");
            ApiError::new(e.to_string()).into_response()
        }
    }
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
