use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use crate::routes::AppState;

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// GET /ready - Readiness probe
///
/// The tracker has no external dependency it needs before serving; the
/// response only reports whether the assistant has credentials.
pub async fn ready(State(app_state): State<AppState>) -> impl IntoResponse {
    let assistant = if app_state.config.assistant.api_key.trim().is_empty() {
        "unconfigured"
    } else {
        "configured"
    };

    (
        StatusCode::OK,
        Json(json!({"status": "ready", "assistant": assistant})),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = health().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
