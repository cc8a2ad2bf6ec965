use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{error, instrument};

use super::types::{ConfirmCodeRequest, MessageResponse};
use super::{bad_payload, failure, message};
use crate::gateway::{
    AuthGateway, GatewayError,
    translate::{CONFIRMATION_FAILED, CONFIRMATION_SUCCEEDED, confirmation_error},
};

#[utoipa::path(
    post,
    path = "/confirm-code",
    request_body = ConfirmCodeRequest,
    responses(
        (status = 200, description = "Account confirmed", body = MessageResponse),
        (status = 400, description = "Code rejected (expired, mismatched or unknown user)", body = MessageResponse),
        (status = 500, description = "Identity provider unavailable", body = MessageResponse)
    ),
    tag = "auth"
)]
#[instrument(skip(gateway, payload))]
pub async fn confirm_code(
    gateway: Extension<Arc<AuthGateway>>,
    payload: Result<Json<ConfirmCodeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return bad_payload(&rejection),
    };

    match gateway
        .confirm(&request.username, &request.confirmation_code)
        .await
    {
        Ok(()) => message(StatusCode::OK, CONFIRMATION_SUCCEEDED),
        Err(GatewayError::Provider(err)) => {
            error!("Confirmation error: {err}");
            let status = if err.is_rejection() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            failure(status, CONFIRMATION_FAILED, confirmation_error(&err))
        }
        Err(err) => {
            error!("Confirmation error: {err}");
            failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                CONFIRMATION_FAILED,
                err.to_string(),
            )
        }
    }
}
