//! API handlers and shared response helpers.

pub mod confirm;
pub mod health;
pub mod login;
pub mod root;
pub mod signup;
pub mod types;


use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::debug;

use self::types::MessageResponse;

pub(crate) fn message(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(MessageResponse {
            message: message.to_string(),
            error: None,
        }),
    )
        .into_response()
}

pub(crate) fn failure(status: StatusCode, message: &str, error: String) -> Response {
    (
        status,
        Json(MessageResponse {
            message: message.to_string(),
            error: Some(error),
        }),
    )
        .into_response()
}

/// Missing body, wrong content type and unparsable JSON all become a 400.
pub(crate) fn bad_payload(rejection: &JsonRejection) -> Response {
    debug!("rejected payload: {}", rejection.body_text());
    failure(
        StatusCode::BAD_REQUEST,
        "Missing payload",
        rejection.body_text(),
    )
}
