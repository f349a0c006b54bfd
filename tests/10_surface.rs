mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn health_reports_ok_with_timestamp() {
    let (status, body) = common::send(common::test_app(), common::get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
    assert!(body["environment"].is_string());
}

#[tokio::test]
async fn root_lists_endpoints() {
    let (status, body) = common::send(common::test_app(), common::get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Storefront API");
    assert!(body["endpoints"].is_object());
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let (status, body) = common::send(common::test_app(), common::get("/no/such/route")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Route not found");
}

#[tokio::test]
async fn malformed_json_body_is_json_400() {
    let req = common::raw_json(
        "POST",
        "/auth/login",
        None,
        "{\"email\": \"broken\"".to_string(),
    );
    let (status, body) = common::send(common::test_app(), req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "error envelope expected: {body}");
}
