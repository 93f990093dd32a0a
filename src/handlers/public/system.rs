use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::app::AppState;

/// GET / - service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Profile API",
        "version": version,
        "endpoints": {
            "profiles": "/api/profile, /api/profile/user/:user_id (public)",
            "github": "/api/profile/github/:username (public)",
            "me": "/api/profile/me (protected)",
            "profile": "POST|DELETE /api/profile (protected)",
            "experience": "PUT /api/profile/experience, DELETE /api/profile/experience/:exp_id (protected)",
            "education": "PUT /api/profile/education, DELETE /api/profile/education/:edu_id (protected)",
        }
    }))
}

/// GET /health - 200 when the store answers, 503 otherwise
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.profiles.store().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": now, "database": "ok" })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "timestamp": now, "database": "unavailable" })),
            )
        }
    }
}
