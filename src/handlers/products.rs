use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::extract::AppJson;
use super::validate::{parse_uuid, validate_image_url, validate_slug};
use crate::config;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;
use crate::store::products::{
    self, NewProduct, NewProductImage, ProductFilter, ProductSort, ProductUpdate,
};

#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sort: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ImagePayload {
    pub url: Option<String>,
    pub alt: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
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
    pub images: Option<Vec<ImagePayload>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
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
    pub images: Option<Vec<ImagePayload>>,
}

fn is_admin(auth: &Option<Extension<AuthUser>>) -> bool {
    auth.as_ref().map(|u| u.role.is_admin()).unwrap_or(false)
}

/// Convert the incoming image array, deriving nothing: order and primary
/// flag are assigned at insert time from array position.
fn convert_images(images: Vec<ImagePayload>) -> Result<Vec<NewProductImage>, ApiError> {
    images
        .into_iter()
        .map(|image| {
            let url = image
                .url
                .ok_or_else(|| ApiError::bad_request("Image URL is required"))?;
            validate_image_url(&url)?;
            Ok(NewProductImage { url, alt: image.alt })
        })
        .collect()
}

/// GET /products - Filtered, paginated listing. Anonymous and customer
/// callers only see active products.
pub async fn list(
    State(state): State<AppState>,
    auth: Option<Extension<AuthUser>>,
    Query(query): Query<ListProductsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let api = &config::config().api;
    let limit = query
        .limit
        .unwrap_or(api.default_page_size)
        .clamp(1, api.max_page_size);
    let offset = query.offset.unwrap_or(0).max(0);

    let mut filter = ProductFilter {
        featured: query.featured.unwrap_or(false),
        search: query.search.filter(|s| !s.trim().is_empty()),
        min_price: query.min_price,
        max_price: query.max_price,
        include_inactive: is_admin(&auth),
        ..Default::default()
    };

    // The category parameter accepts either an id or a slug; a value that
    // resolves to neither matches nothing.
    if let Some(param) = query.category.as_deref().filter(|c| !c.is_empty()) {
        match products::resolve_category_param(&state.pool, param).await? {
            Some(id) => filter.category_id = Some(id),
            None => {
                return Ok(Json(json!({
                    "products": [],
                    "total": 0,
                    "limit": limit,
                    "offset": offset
                })));
            }
        }
    }

    let sort = ProductSort::from_param(query.sort.as_deref());
    let (items, total) = products::list(&state.pool, &filter, sort, limit, offset).await?;

    Ok(Json(json!({
        "products": items,
        "total": total,
        "limit": limit,
        "offset": offset
    })))
}

/// GET /products/:id
pub async fn get(
    State(state): State<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_uuid(&id, "product")?;

    let detail = products::get_by_id(&state.pool, id, is_admin(&auth))
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    Ok(Json(detail))
}

/// GET /products/slug/:slug
pub async fn get_by_slug(
    State(state): State<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = products::get_by_slug(&state.pool, &slug, is_admin(&auth))
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    Ok(Json(detail))
}

/// POST /products - Admin only; creates the product and its images together.
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    AppJson(payload): AppJson<CreateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(name), Some(slug), Some(description), Some(price)) = (
        payload.name,
        payload.slug,
        payload.description,
        payload.price,
    ) else {
        return Err(ApiError::bad_request("Missing required fields"));
    };

    validate_slug(&slug)?;
    if price < Decimal::ZERO {
        return Err(ApiError::bad_request("Price must not be negative"));
    }

    if products::slug_exists(&state.pool, &slug).await? {
        return Err(ApiError::conflict("Slug already exists"));
    }

    let images = convert_images(payload.images.unwrap_or_default())?;

    let new = NewProduct {
        name,
        slug,
        description,
        short_description: payload.short_description,
        price,
        compare_at_price: payload.compare_at_price,
        stock_quantity: payload.stock_quantity.unwrap_or(0),
        category_id: payload.category_id,
        is_featured: payload.is_featured.unwrap_or(false),
        is_active: payload.is_active.unwrap_or(true),
        created_by: auth.user_id,
    };

    let detail = products::create(&state.pool, &new, &images).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// PUT /products/:id - Partial merge; a supplied images array replaces the
/// stored set.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_uuid(&id, "product")?;

    if let Some(slug) = payload.slug.as_deref() {
        validate_slug(slug)?;
    }
    if let Some(price) = payload.price {
        if price < Decimal::ZERO {
            return Err(ApiError::bad_request("Price must not be negative"));
        }
    }

    let images = payload.images.map(convert_images).transpose()?;

    let update = ProductUpdate {
        name: payload.name,
        slug: payload.slug,
        description: payload.description,
        short_description: payload.short_description,
        price: payload.price,
        compare_at_price: payload.compare_at_price,
        stock_quantity: payload.stock_quantity,
        category_id: payload.category_id,
        is_featured: payload.is_featured,
        is_active: payload.is_active,
    };

    let detail = products::update(&state.pool, id, &update, images.as_deref())
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    Ok(Json(detail))
}

/// DELETE /products/:id - Images are removed with the product.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_uuid(&id, "product")?;

    if !products::delete(&state.pool, id).await? {
        return Err(ApiError::not_found("Product not found"));
    }

    Ok(Json(json!({ "message": "Product deleted successfully" })))
}
