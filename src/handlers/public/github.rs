use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::app::AppState;
use crate::error::ApiResult;

/// GET /api/profile/github/:username - the user's latest public repositories,
/// passed through as GitHub returned them
pub async fn repos(State(state): State<AppState>, Path(username): Path<String>) -> ApiResult<Json<Value>> {
    let repos = state.github.user_repos(&username).await?;
    Ok(Json(repos))
}
