use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::pagination::{Page, Paging};

/// Success envelope: `{ "data": ... }`
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Successful responses are always 200, creates included
    pub fn success(data: T) -> Self {
        Self { data }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match serde_json::to_value(&self.data) {
            Ok(data) => (StatusCode::OK, Json(json!({ "data": data }))).into_response(),
            Err(e) => serialization_failure(e),
        }
    }
}

/// Paged envelope: `{ "data": [...], "paging": {...} }`
#[derive(Debug)]
pub struct PagedResponse<T: Serialize> {
    pub data: Vec<T>,
    pub paging: Paging,
}

impl<T: Serialize> From<Page<T>> for PagedResponse<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            data: page.items,
            paging: page.paging,
        }
    }
}

impl<T: Serialize> IntoResponse for PagedResponse<T> {
    fn into_response(self) -> Response {
        let data: Value = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => return serialization_failure(e),
        };
        Json(json!({ "data": data, "paging": self.paging })).into_response()
    }
}

fn serialization_failure(e: serde_json::Error) -> Response {
    tracing::error!("Failed to serialize response data: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "errors": "Failed to serialize response data" })),
    )
        .into_response()
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
pub type PagedResult<T> = Result<PagedResponse<T>, crate::error::ApiError>;
