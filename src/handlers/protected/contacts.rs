// handlers/protected/contacts.rs - /api/contacts[/:contactId]

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::{Extension, Json};

use crate::database::models::Contact;
use crate::extract::{extract_json, extract_path, extract_query};
use crate::middleware::{ApiResponse, ApiResult, AuthUser, PagedResponse, PagedResult};
use crate::state::AppState;
use crate::validation::{ContactRequest, SearchContactRequest};

/// POST /api/contacts
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Result<Json<ContactRequest>, JsonRejection>,
) -> ApiResult<Contact> {
    let request = extract_json(body)?;
    let contact = state.contacts().create(&user, request).await?;
    Ok(ApiResponse::success(contact))
}

/// GET /api/contacts/:contactId
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<Contact> {
    let contact_id = extract_path(path)?;
    let contact = state.contacts().get(&user, contact_id).await?;
    Ok(ApiResponse::success(contact))
}

/// PUT /api/contacts/:contactId - full overwrite, omitted optional fields become null
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<ContactRequest>, JsonRejection>,
) -> ApiResult<Contact> {
    let contact_id = extract_path(path)?;
    let request = extract_json(body)?;
    let contact = state.contacts().update(&user, contact_id, request).await?;
    Ok(ApiResponse::success(contact))
}

/// DELETE /api/contacts/:contactId
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<&'static str> {
    let contact_id = extract_path(path)?;
    state.contacts().delete(&user, contact_id).await?;
    Ok(ApiResponse::success("OK"))
}

/// GET /api/contacts?name&email&phone&page&size
pub async fn search(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    query: Result<Query<SearchContactRequest>, QueryRejection>,
) -> PagedResult<Contact> {
    let request = extract_query(query)?;
    let page = state.contacts().search(&user, request).await?;
    Ok(PagedResponse::from(page))
}
