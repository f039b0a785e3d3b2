use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::app::AppState;

/// Liveness check. The service holds no connections, so this only reports config.
/// GET /health
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let policy = state.link_checker.poll_policy();

    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "link-checker",
            "environment": state.config.server.environment.to_string(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "scanner": {
                "api_key_configured": state.config.scanner.api_key.is_some(),
                "poll_attempts": policy.max_attempts,
                "poll_delay_ms": state.config.scanner.poll_delay_ms,
            }
        })),
    )
}
