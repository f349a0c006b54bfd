use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WishlistItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub added_at: DateTime<Utc>,
}

/// Listing shape: the referenced product's current snapshot, or null when
/// the product has since been deleted.
#[derive(Debug, Clone, Serialize)]
pub struct WishlistEntry {
    pub id: Uuid,
    pub product: Option<super::product::Product>,
    pub added_at: DateTime<Utc>,
}
