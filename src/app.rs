use axum::{
    http::{header, HeaderValue, Method},
    middleware as layer,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{self, AppConfig};
use crate::error::ApiError;
use crate::handlers::{auth, categories, products, settings, users, wishlists};
use crate::middleware::{
    optional_auth, rate_limit_middleware, require_admin, require_auth, RateLimiter,
};
use crate::state::AppState;

/// Assemble the full application router. Shared by the server binary and the
/// integration tests.
pub fn app(state: AppState) -> Router {
    let config = config::config();

    let router = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_routes())
        .merge(product_routes())
        .merge(category_routes())
        .merge(user_routes())
        .merge(wishlist_routes())
        .merge(settings_routes())
        .fallback(not_found);

    let router = if config.api.enable_rate_limiting {
        let limiter = RateLimiter::from_config(&config.api);
        router.layer(layer::from_fn_with_state(limiter, rate_limit_middleware))
    } else {
        router
    };

    router
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    let protected = Router::new()
        .route("/auth/me", get(auth::me).put(auth::update_me))
        .route_layer(layer::from_fn(require_auth));

    Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .merge(protected)
}

fn product_routes() -> Router<AppState> {
    // Reads are public; optional_auth only widens scope for admin tokens
    let public = Router::new()
        .route("/products", get(products::list))
        .route("/products/slug/:slug", get(products::get_by_slug))
        .route("/products/:id", get(products::get))
        .route_layer(layer::from_fn(optional_auth));

    let admin = Router::new()
        .route("/products", post(products::create))
        .route(
            "/products/:id",
            put(products::update).delete(products::delete),
        )
        .route_layer(layer::from_fn(require_admin))
        .route_layer(layer::from_fn(require_auth));

    public.merge(admin)
}

fn category_routes() -> Router<AppState> {
    let public = Router::new()
        .route("/categories", get(categories::list))
        .route_layer(layer::from_fn(optional_auth))
        .route("/categories/:id", get(categories::get));

    let admin = Router::new()
        .route("/categories", post(categories::create))
        .route(
            "/categories/:id",
            put(categories::update).delete(categories::delete),
        )
        .route_layer(layer::from_fn(require_admin))
        .route_layer(layer::from_fn(require_auth));

    public.merge(admin)
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list))
        .route(
            "/users/:id",
            get(users::get).put(users::update).delete(users::delete),
        )
        .route_layer(layer::from_fn(require_admin))
        .route_layer(layer::from_fn(require_auth))
}

fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/wishlists", get(wishlists::list).post(wishlists::add))
        .route("/wishlists/:product_id", axum::routing::delete(wishlists::remove))
        .route_layer(layer::from_fn(require_auth))
}

fn settings_routes() -> Router<AppState> {
    let public = Router::new()
        .route("/settings", get(settings::get_all))
        .route("/settings/:key", get(settings::get_one));

    let admin = Router::new()
        .route("/settings", put(settings::update))
        .route_layer(layer::from_fn(require_admin))
        .route_layer(layer::from_fn(require_auth));

    public.merge(admin)
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.security.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "Storefront API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health (public)",
            "auth": "/auth/signup, /auth/login, /auth/logout (public); /auth/me (bearer)",
            "products": "/products, /products/:id, /products/slug/:slug (public; mutations admin)",
            "categories": "/categories, /categories/:id (public; mutations admin)",
            "wishlists": "/wishlists, /wishlists/:product_id (bearer)",
            "settings": "/settings, /settings/:key (public; mutations admin)",
            "users": "/users, /users/:id (admin)",
        }
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "environment": config::config().environment.as_str(),
    }))
}

async fn not_found() -> impl IntoResponse {
    ApiError::not_found("Route not found")
}
