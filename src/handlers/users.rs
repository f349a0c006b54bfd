//! Administrative user management. Every route here sits behind
//! require_auth + require_admin.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;

use super::extract::AppJson;
use super::validate::parse_uuid;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::{Role, UserProfile};
use crate::state::AppState;
use crate::store::users::{self, AdminUserUpdate};

#[derive(Debug, Deserialize)]
pub struct AdminUpdateUserRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
}

/// GET /users
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let profiles: Vec<UserProfile> = users::list(&state.pool)
        .await?
        .into_iter()
        .map(UserProfile::from)
        .collect();

    Ok(Json(json!({ "users": profiles })))
}

/// GET /users/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_uuid(&id, "user")?;

    let user = users::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(UserProfile::from(user)))
}

/// PUT /users/:id - Partial merge of name, phone and role.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<AdminUpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_uuid(&id, "user")?;

    // Role strings resolve against the closed enum or not at all
    let role = payload
        .role
        .as_deref()
        .map(|r| r.parse::<Role>())
        .transpose()
        .map_err(|_| ApiError::bad_request("Invalid role"))?;

    let update = AdminUserUpdate {
        full_name: payload.full_name,
        phone: payload.phone,
        role,
    };

    let user = users::admin_update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(json!({
        "message": "User updated successfully",
        "user": UserProfile::from(user)
    })))
}

/// DELETE /users/:id - An admin cannot remove their own account.
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_uuid(&id, "user")?;

    if id == auth.user_id {
        return Err(ApiError::bad_request("Cannot delete your own account"));
    }

    if !users::delete(&state.pool, id).await? {
        return Err(ApiError::not_found("User not found"));
    }

    Ok(Json(json!({ "message": "User deleted successfully" })))
}
