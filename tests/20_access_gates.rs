//! The three middleware gates, exercised end to end through the router.
//! Every request here is rejected (or admitted into handler validation)
//! before any database work happens.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use storefront_api::models::Role;

#[tokio::test]
async fn me_without_token_is_401() {
    let (status, body) = common::send(common::test_app(), common::get("/auth/me")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "No token provided");
}

#[tokio::test]
async fn me_with_garbage_token_is_401() {
    let req = common::get_with_token("/auth/me", "definitely.not.ajwt");
    let (status, body) = common::send(common::test_app(), req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn non_bearer_scheme_is_401() {
    let req = axum::http::Request::builder()
        .uri("/wishlists")
        .header("authorization", "Basic dXNlcjpwYXNz")
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, body) = common::send(common::test_app(), req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "No token provided");
}

#[tokio::test]
async fn product_create_without_token_is_401() {
    let req = common::request_json("POST", "/products", None, &json!({"name": "X"}));
    let (status, body) = common::send(common::test_app(), req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "No token provided");
}

#[tokio::test]
async fn product_create_as_customer_is_403() {
    let token = common::customer_token();
    let req = common::request_json("POST", "/products", Some(&token), &json!({"name": "X"}));
    let (status, body) = common::send(common::test_app(), req).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Admin access required");
}

#[tokio::test]
async fn product_update_as_customer_is_403() {
    let token = common::customer_token();
    let req = common::request_json(
        "PUT",
        &format!("/products/{}", Uuid::new_v4()),
        Some(&token),
        &json!({"price": "10.00"}),
    );
    let (status, _) = common::send(common::test_app(), req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn user_listing_as_customer_is_403() {
    let token = common::customer_token();
    let (status, _) =
        common::send(common::test_app(), common::get_with_token("/users", &token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn settings_update_as_customer_is_403() {
    let token = common::customer_token();
    let req = common::request_json("PUT", "/settings", Some(&token), &json!({"k": "v"}));
    let (status, _) = common::send(common::test_app(), req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_token_clears_the_gate() {
    // Passes both gates, then stops at handler validation - proof the gate
    // admitted the request without any store access
    let token = common::admin_token();
    let req = common::request_json("POST", "/products", Some(&token), &json!({"name": "X"}));
    let (status, body) = common::send(common::test_app(), req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");
}

#[tokio::test]
async fn superadmin_token_clears_the_gate() {
    let token = common::token_for(Uuid::new_v4(), Role::Superadmin);
    let req = common::request_json("POST", "/categories", Some(&token), &json!({}));
    let (status, body) = common::send(common::test_app(), req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name and slug are required");
}

#[tokio::test]
async fn admin_cannot_delete_own_account() {
    let user_id = Uuid::new_v4();
    let token = common::token_for(user_id, Role::Admin);
    let req = common::request("DELETE", &format!("/users/{}", user_id), Some(&token));
    let (status, body) = common::send(common::test_app(), req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Cannot delete your own account");
}

#[tokio::test]
async fn public_listing_ignores_invalid_token() {
    // optional_auth swallows the bad token; the request proceeds anonymously
    // and fails at identifier validation, not authentication
    let req = common::get_with_token("/products/not-a-uuid", "broken.token.here");
    let (status, body) = common::send(common::test_app(), req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid product ID");
}
