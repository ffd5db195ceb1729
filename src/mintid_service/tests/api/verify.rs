use axum::http::StatusCode;
use chrono::{Duration, Utc};
use mintid_core::{IssuedCode, UserId, VerificationCode};
use serde_json::json;

use crate::helpers::{different_code, spawn_app};

#[tokio::test]
async fn the_emailed_code_verifies_the_account() {
    let app = spawn_app();
    let (user_id, code) = app.register_ok("ann@x.com").await;

    let (status, body) = app
        .post("/verify", json!({ "userId": user_id.to_string(), "code": code }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Email verified");
}

#[tokio::test]
async fn submitted_code_is_trimmed() {
    let app = spawn_app();
    let (user_id, code) = app.register_ok("ann@x.com").await;

    let (status, _) = app
        .post(
            "/verify",
            json!({ "userId": user_id.to_string(), "code": format!(" {code} ") }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn wrong_code_is_a_mismatch() {
    let app = spawn_app();
    let (user_id, code) = app.register_ok("ann@x.com").await;

    let (status, body) = app
        .post(
            "/verify",
            json!({ "userId": user_id.to_string(), "code": different_code(&code) }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Incorrect verification code");
}

#[tokio::test]
async fn unknown_user_has_no_code() {
    let app = spawn_app();

    let (status, body) = app
        .post(
            "/verify",
            json!({ "userId": UserId::new().to_string(), "code": "123456" }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Verification code not found");
}

#[tokio::test]
async fn expired_code_reports_expiry_even_on_value_match() {
    let app = spawn_app();
    let (user_id, _) = app.register_ok("ann@x.com").await;

    // Newest code for the account is expired: created just now, already
    // past its expiry.
    app.store
        .push_code(
            user_id,
            IssuedCode {
                value: VerificationCode::parse("424242").unwrap(),
                created_at: Utc::now(),
                expires_at: Utc::now() - Duration::seconds(1),
            },
        )
        .await;

    let (status, body) = app
        .post(
            "/verify",
            json!({ "userId": user_id.to_string(), "code": "424242" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Verification code has expired");
}

#[tokio::test]
async fn superseded_code_is_rejected_even_while_unexpired() {
    let app = spawn_app();
    let (user_id, original) = app.register_ok("ann@x.com").await;

    // A newer code arrives; the original is still within its window but no
    // longer authoritative.
    let newer = different_code(&original);
    app.store
        .push_code(
            user_id,
            IssuedCode::issue(
                VerificationCode::parse(&newer).unwrap(),
                Utc::now() + Duration::seconds(1),
            ),
        )
        .await;

    let (status, _) = app
        .post(
            "/verify",
            json!({ "userId": user_id.to_string(), "code": original }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/verify",
            json!({ "userId": user_id.to_string(), "code": newer }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn reverification_with_the_same_code_still_succeeds() {
    let app = spawn_app();
    let (user_id, code) = app.register_ok("ann@x.com").await;

    for _ in 0..2 {
        let (status, _) = app
            .post(
                "/verify",
                json!({ "userId": user_id.to_string(), "code": code }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }
}

#[tokio::test]
async fn missing_fields_and_bad_user_id_are_client_errors() {
    let app = spawn_app();

    let (status, body) = app.post("/verify", json!({ "code": "123456" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Fill in all fields");

    let (status, _) = app
        .post("/verify", json!({ "userId": UserId::new().to_string(), "code": "" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .post("/verify", json!({ "userId": "42", "code": "123456" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid user id");
}
