use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{error, instrument};

use super::types::{MessageResponse, SignupRequest};
use super::{bad_payload, failure, message};
use crate::gateway::{
    AuthGateway, GatewayError, Registration,
    translate::{SIGNUP_FAILED, SIGNUP_PENDING, signup_error},
};

#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created, confirmation code sent", body = MessageResponse),
        (status = 400, description = "Passwords do not match or are too short", body = MessageResponse),
        (status = 500, description = "Identity provider refused or failed the sign-up", body = MessageResponse)
    ),
    tag = "auth"
)]
#[instrument(skip(gateway, payload))]
pub async fn signup(
    gateway: Extension<Arc<AuthGateway>>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return bad_payload(&rejection),
    };

    let registration = Registration {
        username: &request.username,
        email: &request.email,
        password: &request.password,
        password_confirmation: &request.confirm_password,
    };

    match gateway.register(&registration).await {
        Ok(()) => message(StatusCode::OK, SIGNUP_PENDING),
        Err(err @ (GatewayError::PasswordMismatch | GatewayError::PasswordTooShort)) => {
            message(StatusCode::BAD_REQUEST, &err.to_string())
        }
        Err(GatewayError::Provider(err)) => {
            error!("Sign-up error: {err}");
            failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                SIGNUP_FAILED,
                signup_error(&err),
            )
        }
        Err(err) => {
            error!("Sign-up error: {err}");
            failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                SIGNUP_FAILED,
                err.to_string(),
            )
        }
    }
}
