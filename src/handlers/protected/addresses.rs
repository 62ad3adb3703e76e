// handlers/protected/addresses.rs - /api/contacts/:contactId/addresses[/:addressId]
//
// An unknown contact is reported as 404 even when the body is also bad. The
// service resolves the contact before validating, and a body that fails to
// parse is only reported once the contact is known to exist.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::{Extension, Json};

use crate::database::models::Address;
use crate::extract::{extract_json, extract_path};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::validation::AddressRequest;

/// POST /api/contacts/:contactId/addresses
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<AddressRequest>, JsonRejection>,
) -> ApiResult<Address> {
    let contact_id = extract_path(path)?;
    let service = state.addresses();
    let request = match extract_json(body) {
        Ok(request) => request,
        Err(err) => {
            service.check_contact_exists(&user, contact_id).await?;
            return Err(err);
        }
    };
    let address = service.create(&user, contact_id, request).await?;
    Ok(ApiResponse::success(address))
}

/// GET /api/contacts/:contactId/addresses/:addressId
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<(i32, i32)>, PathRejection>,
) -> ApiResult<Address> {
    let (contact_id, address_id) = extract_path(path)?;
    let address = state.addresses().get(&user, contact_id, address_id).await?;
    Ok(ApiResponse::success(address))
}

/// PUT /api/contacts/:contactId/addresses/:addressId
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<(i32, i32)>, PathRejection>,
    body: Result<Json<AddressRequest>, JsonRejection>,
) -> ApiResult<Address> {
    let (contact_id, address_id) = extract_path(path)?;
    let service = state.addresses();
    let request = match extract_json(body) {
        Ok(request) => request,
        Err(err) => {
            service.check_contact_exists(&user, contact_id).await?;
            return Err(err);
        }
    };
    let address = service.update(&user, contact_id, address_id, request).await?;
    Ok(ApiResponse::success(address))
}

/// DELETE /api/contacts/:contactId/addresses/:addressId
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<(i32, i32)>, PathRejection>,
) -> ApiResult<&'static str> {
    let (contact_id, address_id) = extract_path(path)?;
    state.addresses().delete(&user, contact_id, address_id).await?;
    Ok(ApiResponse::success("OK"))
}

/// GET /api/contacts/:contactId/addresses
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<Vec<Address>> {
    let contact_id = extract_path(path)?;
    let addresses = state.addresses().list(&user, contact_id).await?;
    Ok(ApiResponse::success(addresses))
}
