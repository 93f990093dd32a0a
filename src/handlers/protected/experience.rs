use axum::{
    extract::{Path, State},
    Extension, Json,
};

use crate::api::requests::ExperienceRequest;
use crate::app::AppState;
use crate::database::models::Profile;
use crate::error::ApiResult;
use crate::middleware::AuthUser;

/// PUT /api/profile/experience - prepend an experience entry
pub async fn add(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Option<Json<ExperienceRequest>>,
) -> ApiResult<Json<Profile>> {
    let request = body.map(|Json(b)| b).unwrap_or_default();
    let profile = state.profiles.add_experience(user.user_id, request).await?;
    Ok(Json(profile))
}

/// DELETE /api/profile/experience/:exp_id
pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(exp_id): Path<String>,
) -> ApiResult<Json<Profile>> {
    let profile = state.profiles.remove_experience(user.user_id, &exp_id).await?;
    Ok(Json(profile))
}
