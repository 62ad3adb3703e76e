// handlers/public/users.rs - registration and login, no token required

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::database::models::UserProfile;
use crate::extract::extract_json;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::user_service::LoginToken;
use crate::state::AppState;
use crate::validation::{LoginUserRequest, RegisterUserRequest};

/// POST /api/users - register a new account
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterUserRequest>, JsonRejection>,
) -> ApiResult<UserProfile> {
    let request = extract_json(body)?;
    let profile = state.users().register(request).await?;
    Ok(ApiResponse::success(profile))
}

/// POST /api/users/login - exchange username/password for a session token
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginUserRequest>, JsonRejection>,
) -> ApiResult<LoginToken> {
    let request = extract_json(body)?;
    let token = state.users().login(request).await?;
    Ok(ApiResponse::success(token))
}
