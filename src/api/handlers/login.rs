use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{error, instrument};

use super::types::{LoginRequest, MessageResponse, TokenResponse};
use super::{bad_payload, failure, message};
use crate::gateway::{
    AuthGateway, GatewayError, Login,
    translate::{INVALID_CREDENTIALS, LOGIN_FAILED, login_error},
};

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials verified, session token issued", body = TokenResponse),
        (status = 401, description = "Credentials rejected", body = MessageResponse),
        (status = 500, description = "Identity provider or signing failure", body = MessageResponse)
    ),
    tag = "auth"
)]
#[instrument(skip(gateway, payload))]
pub async fn login(
    gateway: Extension<Arc<AuthGateway>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return bad_payload(&rejection),
    };

    match gateway
        .authenticate(&request.username, &request.password)
        .await
    {
        Ok(Login::Granted(token)) => (StatusCode::OK, Json(TokenResponse { token })).into_response(),
        Ok(Login::Rejected) => message(StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS),
        Err(GatewayError::Provider(err)) => {
            error!("Login error: {err}");
            failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                LOGIN_FAILED,
                login_error(&err),
            )
        }
        Err(err) => {
            error!("Login error: {err}");
            failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                LOGIN_FAILED,
                err.to_string(),
            )
        }
    }
}
