use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::database::models::User;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user context, resolved from the request token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub username: String,
    pub name: String,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            name: user.name,
        }
    }
}

/// Token authentication middleware that resolves the caller and injects `AuthUser`
pub async fn token_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_headers(&headers).map_err(|msg| {
        tracing::warn!("Rejected {} {}: {}", request.method(), request.uri().path(), msg);
        ApiError::unauthorized("Unauthorized")
    })?;

    let auth_user = match state.identity.resolve_identity(token).await? {
        Some(user) => user,
        None => {
            tracing::warn!("Rejected {} {}: unknown token", request.method(), request.uri().path());
            return Err(ApiError::unauthorized("Unauthorized"));
        }
    };

    tracing::debug!("Authenticated {} for {}", auth_user.username, request.uri().path());
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// The header carries the bare token, no scheme prefix
fn extract_token_from_headers(headers: &HeaderMap) -> Result<&str, &'static str> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or("Missing Authorization header")?;

    let token = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    if token.trim().is_empty() {
        return Err("Empty token");
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn token_is_taken_verbatim() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(extract_token_from_headers(&headers), Ok("Bearer abc"));
    }

    #[test]
    fn missing_or_blank_header_is_rejected() {
        let mut headers = HeaderMap::new();
        assert!(extract_token_from_headers(&headers).is_err());

        headers.insert(AUTHORIZATION, HeaderValue::from_static("  "));
        assert_eq!(extract_token_from_headers(&headers), Err("Empty token"));
    }
}
