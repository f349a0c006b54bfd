//! Request validation that resolves before any query: malformed path
//! identifiers, missing required fields, and shape checks.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn malformed_product_id_is_400_not_500() {
    let (status, body) =
        common::send(common::test_app(), common::get("/products/not-a-uuid")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid product ID");
}

#[tokio::test]
async fn malformed_category_id_is_400() {
    let (status, body) = common::send(common::test_app(), common::get("/categories/42")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid category ID");
}

#[tokio::test]
async fn malformed_user_id_is_400() {
    let token = common::admin_token();
    let req = common::get_with_token("/users/oops", &token);
    let (status, body) = common::send(common::test_app(), req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid user ID");
}

#[tokio::test]
async fn signup_requires_email_and_password() {
    let req = common::request_json(
        "POST",
        "/auth/signup",
        None,
        &json!({"email": "shopper@example.com"}),
    );
    let (status, body) = common::send(common::test_app(), req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email and password are required");
}

#[tokio::test]
async fn signup_rejects_invalid_email() {
    let req = common::request_json(
        "POST",
        "/auth/signup",
        None,
        &json!({"email": "not-an-email", "password": "hunter22"}),
    );
    let (status, body) = common::send(common::test_app(), req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid email format");
}

#[tokio::test]
async fn login_requires_both_fields() {
    let req = common::request_json("POST", "/auth/login", None, &json!({"password": "x"}));
    let (status, body) = common::send(common::test_app(), req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email and password are required");
}

#[tokio::test]
async fn wishlist_add_requires_product_id() {
    let token = common::customer_token();
    let req = common::request_json("POST", "/wishlists", Some(&token), &json!({}));
    let (status, body) = common::send(common::test_app(), req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Product ID is required");
}

#[tokio::test]
async fn wishlist_add_rejects_malformed_product_id() {
    let token = common::customer_token();
    let req = common::request_json(
        "POST",
        "/wishlists",
        Some(&token),
        &json!({"product_id": "shoes"}),
    );
    let (status, body) = common::send(common::test_app(), req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid product ID");
}

#[tokio::test]
async fn wishlist_remove_rejects_malformed_product_id() {
    let token = common::customer_token();
    let req = common::request("DELETE", "/wishlists/sneakers", Some(&token));
    let (status, _) = common::send(common::test_app(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn product_create_rejects_bad_slug() {
    let token = common::admin_token();
    let req = common::request_json(
        "POST",
        "/products",
        Some(&token),
        &json!({
            "name": "Leather Boots",
            "slug": "Not A Slug",
            "description": "Sturdy boots",
            "price": "89.90"
        }),
    );
    let (status, body) = common::send(common::test_app(), req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Slug must be lowercase letters, digits and hyphens");
}

#[tokio::test]
async fn product_create_rejects_negative_price() {
    let token = common::admin_token();
    let req = common::request_json(
        "POST",
        "/products",
        Some(&token),
        &json!({
            "name": "Leather Boots",
            "slug": "leather-boots",
            "description": "Sturdy boots",
            "price": "-1.00"
        }),
    );
    let (status, body) = common::send(common::test_app(), req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Price must not be negative");
}

#[tokio::test]
async fn product_update_rejects_bad_image_url() {
    let token = common::admin_token();
    let req = common::request_json(
        "PUT",
        &format!("/products/{}", Uuid::new_v4()),
        Some(&token),
        &json!({"images": [{"url": "not a url"}]}),
    );
    let (status, body) = common::send(common::test_app(), req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid image URL");
}

#[tokio::test]
async fn user_update_rejects_unknown_role() {
    let token = common::admin_token();
    let req = common::request_json(
        "PUT",
        &format!("/users/{}", Uuid::new_v4()),
        Some(&token),
        &json!({"role": "root"}),
    );
    let (status, body) = common::send(common::test_app(), req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid role");
}

#[tokio::test]
async fn settings_update_rejects_non_object_body() {
    let token = common::admin_token();
    let req = common::request_json("PUT", "/settings", Some(&token), &json!(["a", "b"]));
    let (status, body) = common::send(common::test_app(), req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Expected an object of settings");
}
