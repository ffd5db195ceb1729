use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mintid_application::{LoginError, VerifyEmailError};
use mintid_core::AccountStoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Every failure a handler can produce, mapped to one JSON response.
/// Messages are written for end users; the `Unexpected` display is a fixed
/// generic string and the real cause only reaches the logs.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Fill in all fields")]
    MissingFields,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Invalid request body")]
    InvalidBody,

    #[error("Invalid user id")]
    InvalidUserId,

    #[error("Email already registered")]
    EmailTaken,

    #[error("Verification code not found")]
    CodeNotFound,

    #[error("Verification code has expired")]
    CodeExpired,

    #[error("Incorrect verification code")]
    CodeMismatch,

    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Email not verified")]
    EmailNotVerified,

    #[error("Internal server error")]
    Unexpected(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            ApiError::MissingFields
            | ApiError::PasswordTooShort
            | ApiError::InvalidEmail
            | ApiError::InvalidBody
            | ApiError::InvalidUserId
            | ApiError::EmailTaken
            | ApiError::CodeExpired
            | ApiError::CodeMismatch => StatusCode::BAD_REQUEST,

            ApiError::CodeNotFound => StatusCode::NOT_FOUND,

            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,

            ApiError::EmailNotVerified => StatusCode::FORBIDDEN,

            ApiError::Unexpected(cause) => {
                tracing::error!(error = %cause, "request failed unexpectedly");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status_code, body).into_response()
    }
}

impl From<AccountStoreError> for ApiError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::EmailTaken => ApiError::EmailTaken,
            other => ApiError::Unexpected(other.to_string()),
        }
    }
}

impl From<VerifyEmailError> for ApiError {
    fn from(error: VerifyEmailError) -> Self {
        match error {
            VerifyEmailError::CodeNotFound => ApiError::CodeNotFound,
            VerifyEmailError::CodeExpired => ApiError::CodeExpired,
            VerifyEmailError::CodeMismatch => ApiError::CodeMismatch,
            VerifyEmailError::Store(e) => ApiError::Unexpected(e.to_string()),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::InvalidCredentials => ApiError::InvalidCredentials,
            LoginError::EmailNotVerified => ApiError::EmailNotVerified,
            LoginError::Store(e) => ApiError::Unexpected(e.to_string()),
        }
    }
}
