use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::spawn_app;

async fn register_and_verify(app: &crate::helpers::TestApp, email: &str) -> String {
    let (user_id, code) = app.register_ok(email).await;
    let (status, _) = app
        .post("/verify", json!({ "userId": user_id.to_string(), "code": code }))
        .await;
    assert_eq!(status, StatusCode::OK);
    user_id.to_string()
}

#[tokio::test]
async fn verified_account_logs_in_and_gets_its_profile() {
    let app = spawn_app();
    let user_id = register_and_verify(&app, "ann@x.com").await;

    let (status, body) = app
        .post("/login", json!({ "email": "Ann@X.com ", "password": "secret1" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], user_id);
    assert_eq!(body["user"]["email"], "ann@x.com");
    assert_eq!(body["user"]["name"], "Ann");
    // The profile is the whole payload; no hash, no flags.
    assert_eq!(
        body["user"].as_object().unwrap().len(),
        3,
        "profile must carry exactly id, email and name"
    );
}

#[tokio::test]
async fn unverified_account_is_forbidden() {
    let app = spawn_app();
    app.register_ok("ann@x.com").await;

    let (status, body) = app
        .post("/login", json!({ "email": "ann@x.com", "password": "secret1" }))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Email not verified");
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_indistinguishable() {
    let app = spawn_app();
    register_and_verify(&app, "ann@x.com").await;

    let (wrong_status, wrong_body) = app
        .post("/login", json!({ "email": "ann@x.com", "password": "not-it-1" }))
        .await;
    let (unknown_status, unknown_body) = app
        .post("/login", json!({ "email": "bob@x.com", "password": "secret1" }))
        .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, wrong_status);
    assert_eq!(unknown_body, wrong_body);
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let app = spawn_app();

    let (status, body) = app.post("/login", json!({ "email": "ann@x.com" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Fill in all fields");
}

#[tokio::test]
async fn full_flow_register_verify_login() {
    let app = spawn_app();

    let (status, body) = app.register("a@x.com", "secret1", "Ann").await;
    assert_eq!(status, StatusCode::OK);
    let user_id = body["userId"].as_str().unwrap().to_string();

    // Wrong code first, then the real one.
    let code = app.outbox.sent().await[0].code.clone();
    let (status, _) = app
        .post(
            "/verify",
            json!({ "userId": user_id, "code": crate::helpers::different_code(&code) }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post("/verify", json!({ "userId": user_id, "code": code }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .post("/login", json!({ "email": "a@x.com", "password": "secret1" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], user_id);
}
