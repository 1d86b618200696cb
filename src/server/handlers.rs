use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::upstream::{UpstreamClient, UpstreamError};
use crate::usage::{aggregate, resolve_all};

use super::dto::{HealthResponse, UsageResponse};

/// Shared application state
pub struct AppState {
    pub upstream: UpstreamClient,
}

/// A fatal request error, rendered as `{"detail": ...}` with a 500
/// status. Only message-listing failures reach this; report-lookup
/// failures are handled per message in the resolver.
pub struct AppError(UpstreamError);

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "usage request failed");
        let body = Json(serde_json::json!({ "detail": self.0.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Report per-message credit usage for the current billing period.
pub async fn get_usage(
    State(state): State<Arc<AppState>>,
) -> Result<Json<UsageResponse>, AppError> {
    let messages = state.upstream.current_period_messages().await?;
    tracing::info!(count = messages.len(), "fetched current period messages");

    let records = resolve_all(&messages, &state.upstream).await;
    let result = aggregate(records);

    Ok(Json(UsageResponse::from(result)))
}

/// Liveness probe, no business logic.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}
