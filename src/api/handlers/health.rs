use crate::GIT_COMMIT_HASH;
use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Method},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

const APP_HEADER: &str = "X-App";

/// Build identity reported by the liveness check.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct Health {
    commit: String,
    name: String,
    version: String,
}

impl Health {
    fn current() -> Self {
        Self {
            commit: GIT_COMMIT_HASH.to_string(),
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// `name:version:shorthash`; the hash part is empty for unknown builds.
    fn app_tag(&self) -> String {
        let short_hash = self.commit.get(..7).filter(|_| self.commit.len() > 7);
        format!(
            "{}:{}:{}",
            self.name,
            self.version,
            short_hash.unwrap_or_default()
        )
    }
}

/// The gateway holds no connections of its own, so being able to answer is
/// the whole check. `OPTIONS` returns the header without a body.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Gateway is accepting requests", body = Health)
    ),
    tag = "health"
)]
pub async fn health(method: Method) -> Response {
    let health = Health::current();

    let mut headers = HeaderMap::new();
    match HeaderValue::from_str(&health.app_tag()) {
        Ok(value) => {
            headers.insert(APP_HEADER, value);
        }
        Err(err) => warn!("Skipping {APP_HEADER} header: {err}"),
    }

    if method == Method::GET {
        (headers, Json(health)).into_response()
    } else {
        (headers, Body::empty()).into_response()
    }
}
