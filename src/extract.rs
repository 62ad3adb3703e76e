//! Rejection mapping for axum extractors.
//!
//! Handlers take `Result<Json<T>, JsonRejection>` (and the `Path`/`Query`
//! equivalents) so a malformed request renders in the `{ "errors": ... }`
//! envelope instead of axum's plain-text rejection. Deferring the rejection
//! to the handler also lets it run ownership checks before reporting a bad
//! body.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;

use crate::error::ApiError;

/// Oversized bodies keep their 413; every other rejection is a 400
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    result.map(|Json(v)| v).map_err(|err| match err.status() {
        StatusCode::PAYLOAD_TOO_LARGE => ApiError::payload_too_large(err.body_text()),
        _ => ApiError::invalid_json(err.body_text()),
    })
}

/// Non-numeric ids end up here as a 400
pub fn extract_path<T>(result: Result<Path<T>, PathRejection>) -> Result<T, ApiError> {
    result
        .map(|Path(v)| v)
        .map_err(|err| ApiError::bad_request(err.body_text()))
}

pub fn extract_query<T>(result: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    result
        .map(|Query(v)| v)
        .map_err(|err| ApiError::bad_request(err.body_text()))
}
