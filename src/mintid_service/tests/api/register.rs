use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use mintid_adapters::MockEmailClient;
use serde_json::json;

use crate::helpers::{spawn_app, spawn_app_with_outbox};

#[tokio::test]
async fn valid_registration_returns_user_id_and_emails_the_code() {
    let app = spawn_app();

    let (status, body) = app.register("Ann@Example.com ", "secret1", "Ann").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["userId"].is_string());
    assert_eq!(body["message"], "Verification code sent to your email");

    let sent = app.outbox.sent().await;
    assert_eq!(sent.len(), 1);
    // Email was normalized before anything was stored or sent.
    assert_eq!(sent[0].recipient, "ann@example.com");
    assert_eq!(sent[0].code.len(), 6);
    assert_eq!(sent[0].name, "Ann");
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let app = spawn_app();
    app.register_ok("ann@x.com").await;

    let (status, body) = app.register("ann@x.com", "other-password", "Other").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email already registered");
}

#[tokio::test]
async fn duplicate_check_ignores_case_and_whitespace() {
    let app = spawn_app();
    app.register_ok("ann@x.com").await;

    let (status, _) = app.register("  ANN@X.COM", "secret1", "Ann").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn short_password_is_rejected() {
    let app = spawn_app();

    let (status, body) = app.register("ann@x.com", "five5", "Ann").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Password must be at least 6 characters");
    assert!(app.outbox.sent().await.is_empty());
}

#[tokio::test]
async fn missing_and_blank_fields_are_rejected() {
    let app = spawn_app();

    let (status, body) = app.post("/register", json!({ "email": "ann@x.com" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Fill in all fields");

    let (status, _) = app.register("ann@x.com", "secret1", "   ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.register("", "secret1", "Ann").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_email_is_rejected() {
    let app = spawn_app();

    let (status, body) = app.register("not-an-email", "secret1", "Ann").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid email address");
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let app = spawn_app();

    let request = Request::builder()
        .method("POST")
        .uri("/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.request(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn email_delivery_failure_is_invisible_to_the_caller() {
    let app = spawn_app_with_outbox(MockEmailClient::failing());

    let (status, body) = app.register("ann@x.com", "secret1", "Ann").await;

    // Fire-and-forget: the account exists and the response is a success.
    assert_eq!(status, StatusCode::OK);
    assert!(body["userId"].is_string());
}

#[tokio::test]
async fn non_post_methods_get_a_json_405() {
    let app = spawn_app();

    let request = Request::builder()
        .method("GET")
        .uri("/register")
        .body(Body::empty())
        .unwrap();

    let (status, body) = {
        use http_body_util::BodyExt;
        let response = app.request(request).await;
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice::<serde_json::Value>(&bytes).unwrap())
    };

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error"], "Method not allowed");
}

#[tokio::test]
async fn preflight_gets_permissive_cors() {
    let app = spawn_app();

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/register")
        .header(header::ORIGIN, "https://app.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.request(request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn responses_carry_the_cors_origin_header() {
    let app = spawn_app();

    let request = Request::builder()
        .method("POST")
        .uri("/register")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ORIGIN, "https://app.example.com")
        .body(Body::from(
            json!({ "email": "ann@x.com", "password": "secret1", "name": "Ann" }).to_string(),
        ))
        .unwrap();

    let response = app.request(request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}
