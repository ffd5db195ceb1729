use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use mintid_application::VerifyEmailUseCase;
use mintid_core::{AccountStore, UserId};
use serde::{Deserialize, Serialize};

use super::error::ApiError;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerifyRequest {
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub message: String,
}

#[tracing::instrument(name = "Verify", skip_all)]
pub async fn verify<S>(
    State(store): State<S>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountStore + Clone + 'static,
{
    let Json(request) = payload.map_err(|_| ApiError::InvalidBody)?;

    let (Some(user_id), Some(code)) = (request.user_id, request.code) else {
        return Err(ApiError::MissingFields);
    };

    let code = code.trim();
    if user_id.trim().is_empty() || code.is_empty() {
        return Err(ApiError::MissingFields);
    }

    let user_id = UserId::parse(&user_id).map_err(|_| ApiError::InvalidUserId)?;

    let use_case = VerifyEmailUseCase::new(store);
    use_case.execute(user_id, code).await?;

    Ok((
        StatusCode::OK,
        Json(VerifyResponse {
            message: String::from("Email verified"),
        }),
    ))
}
