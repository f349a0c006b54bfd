use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Category;

pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
    pub display_order: i32,
    pub is_active: bool,
}

#[derive(Default)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Storefront ordering: display_order first, name as tiebreaker.
pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT * FROM categories
        WHERE is_active OR $1
        ORDER BY display_order ASC, name ASC
        "#,
    )
    .bind(include_inactive)
    .fetch_all(pool)
    .await
}

pub async fn get(pool: &PgPool, id: Uuid) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM categories WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM categories WHERE slug = $1)")
            .bind(slug)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

pub async fn create(pool: &PgPool, new: &NewCategory) -> Result<Category, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO categories (name, slug, description, parent_id, display_order, is_active)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(&new.name)
    .bind(&new.slug)
    .bind(&new.description)
    .bind(new.parent_id)
    .bind(new.display_order)
    .bind(new.is_active)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    update: &CategoryUpdate,
) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE categories SET
            name = COALESCE($2, name),
            slug = COALESCE($3, slug),
            description = COALESCE($4, description),
            parent_id = COALESCE($5, parent_id),
            display_order = COALESCE($6, display_order),
            is_active = COALESCE($7, is_active),
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&update.name)
    .bind(&update.slug)
    .bind(&update.description)
    .bind(update.parent_id)
    .bind(update.display_order)
    .bind(update.is_active)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
