use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;

use super::extract::AppJson;
use super::validate::parse_uuid;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;
use crate::store::wishlists;

#[derive(Debug, Deserialize)]
pub struct AddWishlistRequest {
    pub product_id: Option<String>,
}

/// GET /wishlists - The caller's items with current product snapshots.
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let entries = wishlists::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(entries))
}

/// POST /wishlists - Reject duplicates; the (user, product) pair is unique.
pub async fn add(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    AppJson(payload): AppJson<AddWishlistRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(product_id) = payload.product_id else {
        return Err(ApiError::bad_request("Product ID is required"));
    };
    let product_id = parse_uuid(&product_id, "product")?;

    if wishlists::exists(&state.pool, auth.user_id, product_id).await? {
        return Err(ApiError::conflict("Product already in wishlist"));
    }

    // A concurrent duplicate slips past the check above and lands on the
    // unique constraint, surfacing as the same 409
    let item = wishlists::add(&state.pool, auth.user_id, product_id).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// DELETE /wishlists/:product_id
pub async fn remove(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(product_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let product_id = parse_uuid(&product_id, "product")?;

    if !wishlists::remove(&state.pool, auth.user_id, product_id).await? {
        return Err(ApiError::not_found("Product not in wishlist"));
    }

    Ok(Json(json!({ "message": "Product removed from wishlist" })))
}
