use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Role, User};

pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Default)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Default)]
pub struct AdminUserUpdate {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<Role>,
}

/// Email lookups are case-insensitive, matching the unique index.
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE lower(email) = lower($1)")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(pool: &PgPool, new: &NewUser) -> Result<User, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO users (email, password_hash, full_name, phone)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(&new.email)
    .bind(&new.password_hash)
    .bind(&new.full_name)
    .bind(&new.phone)
    .fetch_one(pool)
    .await
}

pub async fn record_sign_in(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET last_sign_in_at = now(), updated_at = now() WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Self-service partial merge; absent fields keep their stored value.
pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    update: &ProfileUpdate,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE users SET
            full_name = COALESCE($2, full_name),
            phone = COALESCE($3, phone),
            avatar_url = COALESCE($4, avatar_url),
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&update.full_name)
    .bind(&update.phone)
    .bind(&update.avatar_url)
    .fetch_optional(pool)
    .await
}

pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn admin_update(
    pool: &PgPool,
    id: Uuid,
    update: &AdminUserUpdate,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE users SET
            full_name = COALESCE($2, full_name),
            phone = COALESCE($3, phone),
            role = COALESCE($4, role),
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&update.full_name)
    .bind(&update.phone)
    .bind(update.role.map(|r| r.as_str()))
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
