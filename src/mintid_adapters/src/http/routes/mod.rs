pub mod error;
pub mod login;
pub mod register;
pub mod verify;

pub use error::{ApiError, ErrorResponse};
pub use login::{LoginRequest, LoginResponse, UserProfile, login};
pub use register::{RegisterRequest, RegisterResponse, register};
pub use verify::{VerifyRequest, VerifyResponse, verify};

use axum::{Json, http::StatusCode, response::IntoResponse};

/// JSON 405 for anything that is not POST or OPTIONS.
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse {
            error: String::from("Method not allowed"),
        }),
    )
}

/// Bare OPTIONS gets an empty 200; the CORS layer fills in the headers.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
