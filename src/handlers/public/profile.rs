use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::database::models::Profile;
use crate::error::ApiResult;

/// GET /api/profile - every profile with its owner's name and avatar
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let profiles = state.profiles.list().await?;
    Ok(Json(json!({ "profiles": profiles })))
}

/// GET /api/profile/user/:user_id
///
/// A malformed id answers 400 "Profile not found" rather than a server error.
pub async fn by_user(State(state): State<AppState>, Path(user_id): Path<String>) -> ApiResult<Json<Profile>> {
    let profile = state.profiles.get_by_user(&user_id).await?;
    Ok(Json(profile))
}
