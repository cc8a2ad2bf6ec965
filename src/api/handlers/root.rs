use axum::response::IntoResponse;

// Plain banner, kept out of the OpenAPI document.
pub async fn root() -> impl IntoResponse {
    format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
