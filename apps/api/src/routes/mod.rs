pub mod export;
pub mod health;
pub mod pages;
pub mod stats;

use axum::extract::Request;
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use axum::{
    routing::{get, post},
    Router,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::upstream::Session;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Public portfolio pages
        .route("/p/:slug", get(pages::public_portfolio))
        .route("/p/:slug/track", post(pages::track_click))
        // Builder-facing API
        .route(
            "/api/v1/portfolios/:id/preview",
            get(pages::preview_portfolio),
        )
        .route("/api/v1/portfolios/:id/stats", get(stats::portfolio_stats))
        .route("/api/v1/portfolios/:id/export", post(export::start_export))
        .route("/api/v1/export/:job_id", get(export::export_status))
        .route(
            "/api/v1/export/:job_id/download",
            get(export::download_export),
        )
        .layer(axum::middleware::from_fn(request_id))
        .with_state(state)
}

/// Tags each request and its response with an `x-request-id` so log lines
/// from one request correlate across the trace layer and the upstream calls.
pub async fn request_id(mut request: Request, next: Next) -> Response {
    let id = Uuid::new_v4().to_string();
    if let Ok(value) = HeaderValue::from_str(&id) {
        request.headers_mut().insert("x-request-id", value.clone());
        let mut response = next.run(request).await;
        response.headers_mut().insert("x-request-id", value);
        return response;
    }
    next.run(request).await
}

/// Builds a [`Session`] from the caller's bearer token. The token passes
/// through to the upstream verbatim; this service never mints its own.
pub fn bearer_session(headers: &HeaderMap) -> Result<Session, AppError> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AppError::Unauthorized)?;
    let token = header.strip_prefix("Bearer ").ok_or(AppError::Unauthorized)?;
    if token.trim().is_empty() {
        return Err(AppError::Unauthorized);
    }
    Ok(Session::from_tokens(token, None))
}
