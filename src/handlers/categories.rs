use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::extract::AppJson;
use super::validate::{parse_uuid, validate_slug};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;
use crate::store::categories::{self, CategoryUpdate, NewCategory};

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// GET /categories - Inactive categories only appear for admin callers.
pub async fn list(
    State(state): State<AppState>,
    auth: Option<Extension<AuthUser>>,
) -> Result<impl IntoResponse, ApiError> {
    let include_inactive = auth.as_ref().map(|u| u.role.is_admin()).unwrap_or(false);
    let items = categories::list(&state.pool, include_inactive).await?;
    Ok(Json(items))
}

/// GET /categories/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_uuid(&id, "category")?;

    let category = categories::get(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Category not found"))?;

    Ok(Json(category))
}

/// POST /categories - Admin only.
pub async fn create(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateCategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(name), Some(slug)) = (payload.name, payload.slug) else {
        return Err(ApiError::bad_request("Name and slug are required"));
    };

    validate_slug(&slug)?;

    if categories::slug_exists(&state.pool, &slug).await? {
        return Err(ApiError::conflict("Slug already exists"));
    }

    let new = NewCategory {
        name,
        slug,
        description: payload.description,
        parent_id: payload.parent_id,
        display_order: payload.display_order.unwrap_or(0),
        is_active: payload.is_active.unwrap_or(true),
    };

    let category = categories::create(&state.pool, &new).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /categories/:id - Partial merge, admin only.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateCategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_uuid(&id, "category")?;

    if let Some(slug) = payload.slug.as_deref() {
        validate_slug(slug)?;
    }

    let update = CategoryUpdate {
        name: payload.name,
        slug: payload.slug,
        description: payload.description,
        parent_id: payload.parent_id,
        display_order: payload.display_order,
        is_active: payload.is_active,
    };

    let category = categories::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("Category not found"))?;

    Ok(Json(category))
}

/// DELETE /categories/:id - Products in the category fall back to
/// uncategorized rather than disappearing.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_uuid(&id, "category")?;

    if !categories::delete(&state.pool, id).await? {
        return Err(ApiError::not_found("Category not found"));
    }

    Ok(Json(json!({ "message": "Category deleted successfully" })))
}
