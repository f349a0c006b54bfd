use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

use crate::models::{CategorySummary, Product, ProductDetail, ProductImage};

#[derive(Debug, Default, Clone)]
pub struct ProductFilter {
    pub category_id: Option<Uuid>,
    pub featured: bool,
    pub search: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Admin callers see inactive products too
    pub include_inactive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
}

impl ProductSort {
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("price_asc") => ProductSort::PriceAsc,
            Some("price_desc") => ProductSort::PriceDesc,
            Some("name_asc") => ProductSort::NameAsc,
            Some("name_desc") => ProductSort::NameDesc,
            _ => ProductSort::Newest,
        }
    }

    fn order_clause(&self) -> &'static str {
        match self {
            ProductSort::Newest => " ORDER BY created_at DESC",
            ProductSort::PriceAsc => " ORDER BY price ASC",
            ProductSort::PriceDesc => " ORDER BY price DESC",
            ProductSort::NameAsc => " ORDER BY name ASC",
            ProductSort::NameDesc => " ORDER BY name DESC",
        }
    }
}

pub struct NewProduct {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub short_description: Option<String>,
    pub price: Decimal,
    pub compare_at_price: Option<Decimal>,
    pub stock_quantity: i32,
    pub category_id: Option<Uuid>,
    pub is_featured: bool,
    pub is_active: bool,
    pub created_by: Uuid,
}

/// Incoming image as supplied by the client; ordering and primary flag are
/// derived from array position.
pub struct NewProductImage {
    pub url: String,
    pub alt: Option<String>,
}

#[derive(Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub price: Option<Decimal>,
    pub compare_at_price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
    pub category_id: Option<Uuid>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    if !filter.include_inactive {
        qb.push(" AND is_active = TRUE");
    }
    if let Some(category_id) = filter.category_id {
        qb.push(" AND category_id = ").push_bind(category_id);
    }
    if filter.featured {
        qb.push(" AND is_featured = TRUE");
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search);
        qb.push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(min) = filter.min_price {
        qb.push(" AND price >= ").push_bind(min);
    }
    if let Some(max) = filter.max_price {
        qb.push(" AND price <= ").push_bind(max);
    }
}

pub async fn list(
    pool: &PgPool,
    filter: &ProductFilter,
    sort: ProductSort,
    limit: i64,
    offset: i64,
) -> Result<(Vec<ProductDetail>, i64), sqlx::Error> {
    let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM products WHERE TRUE");
    push_filters(&mut count_qb, filter);
    let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

    let mut qb = QueryBuilder::new("SELECT * FROM products WHERE TRUE");
    push_filters(&mut qb, filter);
    qb.push(sort.order_clause());
    qb.push(" LIMIT ").push_bind(limit);
    qb.push(" OFFSET ").push_bind(offset);

    let products: Vec<Product> = qb.build_query_as().fetch_all(pool).await?;
    let details = enrich(pool, products).await?;

    Ok((details, total))
}

pub async fn get_by_id(
    pool: &PgPool,
    id: Uuid,
    include_inactive: bool,
) -> Result<Option<ProductDetail>, sqlx::Error> {
    let product: Option<Product> =
        sqlx::query_as("SELECT * FROM products WHERE id = $1 AND (is_active OR $2)")
            .bind(id)
            .bind(include_inactive)
            .fetch_optional(pool)
            .await?;

    enrich_one(pool, product).await
}

pub async fn get_by_slug(
    pool: &PgPool,
    slug: &str,
    include_inactive: bool,
) -> Result<Option<ProductDetail>, sqlx::Error> {
    let product: Option<Product> =
        sqlx::query_as("SELECT * FROM products WHERE slug = $1 AND (is_active OR $2)")
            .bind(slug)
            .bind(include_inactive)
            .fetch_optional(pool)
            .await?;

    enrich_one(pool, product).await
}

pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM products WHERE slug = $1)")
        .bind(slug)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

/// Resolve a category list-filter value that may be an id or a slug.
pub async fn resolve_category_param(
    pool: &PgPool,
    param: &str,
) -> Result<Option<Uuid>, sqlx::Error> {
    if let Ok(id) = Uuid::parse_str(param) {
        return Ok(Some(id));
    }
    sqlx::query_scalar("SELECT id FROM categories WHERE slug = $1")
        .bind(param)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    new: &NewProduct,
    images: &[NewProductImage],
) -> Result<ProductDetail, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let product: Product = sqlx::query_as(
        r#"
        INSERT INTO products (
            name, slug, description, short_description, price, compare_at_price,
            stock_quantity, category_id, is_featured, is_active, created_by
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(&new.name)
    .bind(&new.slug)
    .bind(&new.description)
    .bind(&new.short_description)
    .bind(new.price)
    .bind(new.compare_at_price)
    .bind(new.stock_quantity)
    .bind(new.category_id)
    .bind(new.is_featured)
    .bind(new.is_active)
    .bind(new.created_by)
    .fetch_one(&mut *tx)
    .await?;

    insert_images(&mut tx, product.id, &product.name, images).await?;
    tx.commit().await?;

    let detail = get_by_id(pool, product.id, true).await?;
    // The row was just committed; treat a vanishing read as a driver error
    detail.ok_or(sqlx::Error::RowNotFound)
}

/// Partial merge. A supplied image set replaces the stored one wholesale;
/// the delete and re-insert share one transaction so readers never observe
/// a half-replaced gallery.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    update: &ProductUpdate,
    images: Option<&[NewProductImage]>,
) -> Result<Option<ProductDetail>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let product: Option<Product> = sqlx::query_as(
        r#"
        UPDATE products SET
            name = COALESCE($2, name),
            slug = COALESCE($3, slug),
            description = COALESCE($4, description),
            short_description = COALESCE($5, short_description),
            price = COALESCE($6, price),
            compare_at_price = COALESCE($7, compare_at_price),
            stock_quantity = COALESCE($8, stock_quantity),
            category_id = COALESCE($9, category_id),
            is_featured = COALESCE($10, is_featured),
            is_active = COALESCE($11, is_active),
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&update.name)
    .bind(&update.slug)
    .bind(&update.description)
    .bind(&update.short_description)
    .bind(update.price)
    .bind(update.compare_at_price)
    .bind(update.stock_quantity)
    .bind(update.category_id)
    .bind(update.is_featured)
    .bind(update.is_active)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(product) = product else {
        return Ok(None);
    };

    if let Some(images) = images {
        sqlx::query("DELETE FROM product_images WHERE product_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        insert_images(&mut tx, id, &product.name, images).await?;
    }

    tx.commit().await?;
    get_by_id(pool, id, true).await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    // Images go with the product via FK cascade
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// First image becomes primary, display order follows array position.
async fn insert_images(
    tx: &mut Transaction<'_, Postgres>,
    product_id: Uuid,
    product_name: &str,
    images: &[NewProductImage],
) -> Result<(), sqlx::Error> {
    for (index, image) in images.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO product_images (product_id, image_url, alt_text, is_primary, display_order)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(product_id)
        .bind(&image.url)
        .bind(image.alt.as_deref().unwrap_or(product_name))
        .bind(index == 0)
        .bind(index as i32)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

async fn enrich_one(
    pool: &PgPool,
    product: Option<Product>,
) -> Result<Option<ProductDetail>, sqlx::Error> {
    match product {
        Some(product) => Ok(enrich(pool, vec![product]).await?.into_iter().next()),
        None => Ok(None),
    }
}

/// Attach ordered images and the category snapshot in two batched lookups.
async fn enrich(pool: &PgPool, products: Vec<Product>) -> Result<Vec<ProductDetail>, sqlx::Error> {
    if products.is_empty() {
        return Ok(vec![]);
    }

    let ids: Vec<Uuid> = products.iter().map(|p| p.id).collect();
    let images: Vec<ProductImage> = sqlx::query_as(
        r#"
        SELECT * FROM product_images
        WHERE product_id = ANY($1)
        ORDER BY display_order ASC, created_at ASC
        "#,
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    let category_ids: Vec<Uuid> = products.iter().filter_map(|p| p.category_id).collect();
    let categories: Vec<CategorySummary> = if category_ids.is_empty() {
        vec![]
    } else {
        sqlx::query_as("SELECT id, name, slug FROM categories WHERE id = ANY($1)")
            .bind(&category_ids)
            .fetch_all(pool)
            .await?
    };

    let mut images_by_product: HashMap<Uuid, Vec<ProductImage>> = HashMap::new();
    for image in images {
        images_by_product.entry(image.product_id).or_default().push(image);
    }
    let categories_by_id: HashMap<Uuid, CategorySummary> =
        categories.into_iter().map(|c| (c.id, c)).collect();

    Ok(products
        .into_iter()
        .map(|product| {
            let images = images_by_product.remove(&product.id).unwrap_or_default();
            let category = product
                .category_id
                .and_then(|id| categories_by_id.get(&id).cloned());
            ProductDetail {
                product,
                images,
                category,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_param_mapping() {
        assert_eq!(ProductSort::from_param(None), ProductSort::Newest);
        assert_eq!(ProductSort::from_param(Some("price_asc")), ProductSort::PriceAsc);
        assert_eq!(ProductSort::from_param(Some("price_desc")), ProductSort::PriceDesc);
        assert_eq!(ProductSort::from_param(Some("name_asc")), ProductSort::NameAsc);
        assert_eq!(ProductSort::from_param(Some("name_desc")), ProductSort::NameDesc);
        // Unknown values fall back to the default ordering
        assert_eq!(ProductSort::from_param(Some("rating")), ProductSort::Newest);
    }

    #[test]
    fn default_sort_is_newest_first() {
        assert_eq!(ProductSort::default().order_clause(), " ORDER BY created_at DESC");
    }
}
