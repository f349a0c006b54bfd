use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use serde::Deserialize;
use serde_json::json;

use super::extract::AppJson;
use super::validate::validate_email;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::{issue_token, Claims};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::UserProfile;
use crate::state::AppState;
use crate::store::users::{self, NewUser, ProfileUpdate};

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
}

/// POST /auth/signup - Create an account and return a signed token.
///
/// Email is normalized to lowercase before both the existence check and the
/// insert; the unique index on lower(email) backs the 409.
pub async fn signup(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(email), Some(password)) = (payload.email, payload.password) else {
        return Err(ApiError::bad_request("Email and password are required"));
    };
    if email.trim().is_empty() || password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    let email = email.trim().to_lowercase();
    validate_email(&email)?;

    if users::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(ApiError::conflict("User already exists"));
    }

    let new_user = NewUser {
        email,
        password_hash: hash_password(&password)?,
        full_name: payload.full_name,
        phone: payload.phone,
    };
    let user = users::create(&state.pool, &new_user).await?;

    let token = issue_token(&Claims::new(user.id, user.email.clone(), user.role))
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "user": UserProfile::from(user), "token": token })),
    ))
}

/// POST /auth/login - Verify credentials and return a signed token.
///
/// Unknown email and wrong password produce the identical response, so the
/// endpoint never confirms whether an address is registered.
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(email), Some(password)) = (payload.email, payload.password) else {
        return Err(ApiError::bad_request("Email and password are required"));
    };

    let user = users::find_by_email(&state.pool, email.trim())
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !verify_password(&password, &user.password_hash) {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    users::record_sign_in(&state.pool, user.id).await?;

    let token = issue_token(&Claims::new(user.id, user.email.clone(), user.role))
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok(Json(json!({ "user": UserProfile::from(user), "token": token })))
}

/// GET /auth/me - Current account, password hash excluded.
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let user = users::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(UserProfile::from(user)))
}

/// PUT /auth/me - Self-service profile fields only; role is not touchable here.
pub async fn update_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    AppJson(payload): AppJson<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let update = ProfileUpdate {
        full_name: payload.full_name,
        phone: payload.phone,
        avatar_url: payload.avatar_url,
    };

    let user = users::update_profile(&state.pool, auth.user_id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(UserProfile::from(user)))
}

/// POST /auth/logout - Tokens are stateless; the client discards its copy.
pub async fn logout() -> impl IntoResponse {
    Json(json!({ "message": "Logged out successfully" }))
}
