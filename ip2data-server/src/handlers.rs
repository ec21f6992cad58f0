use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use serde::Serialize;
use std::sync::Arc;

use ip2data_core::{AggregateError, Aggregator, config::SHORT_CACHE_SECS};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// `GET /api/all` — the aggregation endpoint.
///
/// Success carries a short cache hint matching the freshness window of the
/// geolocation/weather/air upstreams; the country profile's longer window is
/// an upstream-side hint only, so the merged payload uses the minimum.
pub async fn get_all(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let forwarded_for = header_str(&headers, "x-forwarded-for");
    let real_ip = header_str(&headers, "x-real-ip");

    let dashboard = state
        .aggregator
        .dashboard(forwarded_for, real_ip)
        .await
        .map_err(error_reply)?;

    Ok((
        [(header::CACHE_CONTROL, format!("public, max-age={SHORT_CACHE_SECS}"))],
        Json(dashboard),
    ))
}

/// `GET /health`
pub async fn health() -> &'static str {
    "ok"
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn error_reply(err: AggregateError) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        AggregateError::GeolocationRejected { message } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Geolocation failed".to_string(),
                details: Some(message),
            }),
        ),
        AggregateError::Upstream(err) => {
            tracing::error!("aggregation failed: {err:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse { error: "Failed to fetch data".to_string(), details: None }),
            )
        }
    }
}
