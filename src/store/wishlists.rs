use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Product, WishlistEntry, WishlistItem};

/// Items with the referenced product's current snapshot. A product deleted
/// after being wished for shows up with `product: null`, matching the
/// dangling-reference behavior of the original data model.
pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<WishlistEntry>, sqlx::Error> {
    let items: Vec<WishlistItem> =
        sqlx::query_as("SELECT * FROM wishlists WHERE user_id = $1 ORDER BY added_at DESC")
            .bind(user_id)
            .fetch_all(pool)
            .await?;

    if items.is_empty() {
        return Ok(vec![]);
    }

    let product_ids: Vec<Uuid> = items.iter().map(|i| i.product_id).collect();
    let products: Vec<Product> = sqlx::query_as("SELECT * FROM products WHERE id = ANY($1)")
        .bind(&product_ids)
        .fetch_all(pool)
        .await?;

    let mut products_by_id: HashMap<Uuid, Product> =
        products.into_iter().map(|p| (p.id, p)).collect();

    Ok(items
        .into_iter()
        .map(|item| WishlistEntry {
            id: item.id,
            product: products_by_id.remove(&item.product_id),
            added_at: item.added_at,
        })
        .collect())
}

pub async fn exists(pool: &PgPool, user_id: Uuid, product_id: Uuid) -> Result<bool, sqlx::Error> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM wishlists WHERE user_id = $1 AND product_id = $2)",
    )
    .bind(user_id)
    .bind(product_id)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}

pub async fn add(
    pool: &PgPool,
    user_id: Uuid,
    product_id: Uuid,
) -> Result<WishlistItem, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO wishlists (user_id, product_id)
        VALUES ($1, $2)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(product_id)
    .fetch_one(pool)
    .await
}

pub async fn remove(pool: &PgPool, user_id: Uuid, product_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM wishlists WHERE user_id = $1 AND product_id = $2")
        .bind(user_id)
        .bind(product_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
