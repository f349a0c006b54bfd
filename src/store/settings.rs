use sqlx::PgPool;

use crate::models::SiteSetting;

pub async fn all(pool: &PgPool) -> Result<Vec<SiteSetting>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM site_settings ORDER BY key")
        .fetch_all(pool)
        .await
}

pub async fn get(pool: &PgPool, key: &str) -> Result<Option<SiteSetting>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM site_settings WHERE key = $1")
        .bind(key)
        .fetch_optional(pool)
        .await
}

/// Upsert every supplied pair inside one transaction so a bulk update is
/// all-or-nothing from the caller's perspective.
pub async fn upsert_many(
    pool: &PgPool,
    entries: &serde_json::Map<String, serde_json::Value>,
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    for (key, value) in entries {
        sqlx::query(
            r#"
            INSERT INTO site_settings (key, value, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = now()
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}
