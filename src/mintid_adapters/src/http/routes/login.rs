use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use mintid_application::LoginUseCase;
use mintid_core::{AccountStore, Email, EmailError, Password, PasswordError, UserId};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use super::error::ApiError;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<Secret<String>>,
    #[serde(default)]
    pub password: Option<Secret<String>>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub name: String,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<S>(
    State(store): State<S>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountStore + Clone + 'static,
{
    let Json(request) = payload.map_err(|_| ApiError::InvalidBody)?;

    let (Some(email), Some(password)) = (request.email, request.password) else {
        return Err(ApiError::MissingFields);
    };

    // Anything that cannot belong to a stored account fails exactly like a
    // wrong password, so the response leaks nothing about what exists.
    let email = Email::try_from(email).map_err(|e| match e {
        EmailError::Empty => ApiError::MissingFields,
        EmailError::Invalid => ApiError::InvalidCredentials,
    })?;
    let password = Password::try_from(password).map_err(|e| match e {
        PasswordError::Empty => ApiError::MissingFields,
        PasswordError::TooShort => ApiError::InvalidCredentials,
    })?;

    let use_case = LoginUseCase::new(store);
    let account = use_case.execute(email, password).await?;

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            user: UserProfile {
                id: account.id,
                email: account.email.as_ref().expose_secret().clone(),
                name: account.name.as_str().to_string(),
            },
        }),
    ))
}
