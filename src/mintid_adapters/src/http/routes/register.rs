use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use mintid_application::RegisterUseCase;
use mintid_core::{
    AccountStore, DisplayName, Email, EmailClient, EmailError, NewAccount, Password,
    PasswordError, UserId,
};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use super::error::ApiError;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: Option<Secret<String>>,
    #[serde(default)]
    pub password: Option<Secret<String>>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    pub message: String,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<S, E>(
    State((store, email_client)): State<(S, E)>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let Json(request) = payload.map_err(|_| ApiError::InvalidBody)?;

    let (Some(email), Some(password), Some(name)) =
        (request.email, request.password, request.name)
    else {
        return Err(ApiError::MissingFields);
    };

    let email = Email::try_from(email).map_err(|e| match e {
        EmailError::Empty => ApiError::MissingFields,
        EmailError::Invalid => ApiError::InvalidEmail,
    })?;
    let password = Password::try_from(password).map_err(|e| match e {
        PasswordError::Empty => ApiError::MissingFields,
        PasswordError::TooShort => ApiError::PasswordTooShort,
    })?;
    let name = DisplayName::parse(&name).map_err(|_| ApiError::MissingFields)?;

    let use_case = RegisterUseCase::new(store, email_client);
    let registration = use_case
        .execute(NewAccount {
            email,
            password,
            name,
        })
        .await?;

    Ok((
        StatusCode::OK,
        Json(RegisterResponse {
            user_id: registration.user_id,
            message: String::from("Verification code sent to your email"),
        }),
    ))
}
