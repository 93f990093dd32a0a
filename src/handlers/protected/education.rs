use axum::{
    extract::{Path, State},
    Extension, Json,
};

use crate::api::requests::EducationRequest;
use crate::app::AppState;
use crate::database::models::Profile;
use crate::error::ApiResult;
use crate::middleware::AuthUser;

/// PUT /api/profile/education - prepend an education entry
pub async fn add(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Option<Json<EducationRequest>>,
) -> ApiResult<Json<Profile>> {
    let request = body.map(|Json(b)| b).unwrap_or_default();
    let profile = state.profiles.add_education(user.user_id, request).await?;
    Ok(Json(profile))
}

/// DELETE /api/profile/education/:edu_id
pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(edu_id): Path<String>,
) -> ApiResult<Json<Profile>> {
    let profile = state.profiles.remove_education(user.user_id, &edu_id).await?;
    Ok(Json(profile))
}
