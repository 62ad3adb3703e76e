// handlers/protected/users.rs - the caller's own account

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::{Extension, Json};

use crate::database::models::UserProfile;
use crate::extract::extract_json;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::validation::UpdateUserRequest;

/// GET /api/users/current
pub async fn current(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<UserProfile> {
    let profile = state.users().get(&user).await?;
    Ok(ApiResponse::success(profile))
}

/// PATCH /api/users/current - change name and/or password
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> ApiResult<UserProfile> {
    let request = extract_json(body)?;
    let profile = state.users().update(&user, request).await?;
    Ok(ApiResponse::success(profile))
}

/// DELETE /api/users/logout
pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<&'static str> {
    state.users().logout(&user).await?;
    Ok(ApiResponse::success("OK"))
}
