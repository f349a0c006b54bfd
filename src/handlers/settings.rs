use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Map, Value};

use super::extract::AppJson;
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::settings;

/// GET /settings - Every pair flattened into a single object.
pub async fn get_all(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let rows = settings::all(&state.pool).await?;

    let mut flattened = Map::new();
    for row in rows {
        flattened.insert(row.key, row.value);
    }

    Ok(Json(Value::Object(flattened)))
}

/// GET /settings/:key
pub async fn get_one(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let setting = settings::get(&state.pool, &key)
        .await?
        .ok_or_else(|| ApiError::not_found("Setting not found"))?;

    // Keyed by the setting name itself, e.g. {"store_name": "..."}
    let mut body = Map::new();
    body.insert(setting.key, setting.value);
    Ok(Json(Value::Object(body)))
}

/// PUT /settings - Admin only; upserts every supplied key.
pub async fn update(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let Value::Object(entries) = payload else {
        return Err(ApiError::bad_request("Expected an object of settings"));
    };

    settings::upsert_many(&state.pool, &entries).await?;

    Ok(Json(json!({ "message": "Settings updated successfully" })))
}
