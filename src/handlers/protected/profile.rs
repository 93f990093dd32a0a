use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};

use crate::api::requests::ProfileRequest;
use crate::app::AppState;
use crate::error::ApiResult;
use crate::middleware::AuthUser;

/// GET /api/profile/me - the caller's profile
pub async fn me(State(state): State<AppState>, Extension(user): Extension<AuthUser>) -> ApiResult<Json<Value>> {
    let profile = state.profiles.get_own(user.user_id).await?;
    Ok(Json(json!({ "profile": profile })))
}

/// POST /api/profile - create or update the caller's profile
///
/// Only fields present in the body are written; `status` and `skills` are
/// required. A missing or unparseable body is validated as an empty one.
pub async fn upsert(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Option<Json<ProfileRequest>>,
) -> ApiResult<Json<Value>> {
    let request = body.map(|Json(b)| b).unwrap_or_default();
    let profile = state.profiles.upsert(user.user_id, request).await?;
    Ok(Json(json!({ "profile": profile })))
}

/// DELETE /api/profile - remove the caller's profile and user record
pub async fn delete(State(state): State<AppState>, Extension(user): Extension<AuthUser>) -> ApiResult<Json<Value>> {
    state.profiles.delete(user.user_id).await?;
    Ok(Json(json!({ "msg": "User deleted" })))
}
