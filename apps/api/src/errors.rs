use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::upstream::UpstreamError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Upstream error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Render error: {0}")]
    Render(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Unauthorized => AppError::Unauthorized,
            UpstreamError::Forbidden(msg) => AppError::Forbidden(msg),
            UpstreamError::NotFound(msg) => AppError::NotFound(msg),
            UpstreamError::Api { status, message } if status < 500 => {
                AppError::Validation(message)
            }
            UpstreamError::Api { status, message } => AppError::Upstream { status, message },
            UpstreamError::Timeout(msg) => AppError::Upstream {
                status: 504,
                message: msg,
            },
            UpstreamError::Http(e) => AppError::Upstream {
                status: 502,
                message: e.to_string(),
            },
            UpstreamError::Parse(e) => AppError::Upstream {
                status: 502,
                message: format!("Invalid upstream response: {e}"),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            AppError::Upstream { status, message } => {
                tracing::error!("Upstream error ({status}): {message}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    "The portfolio platform could not be reached".to_string(),
                )
            }
            AppError::Render(msg) => {
                tracing::error!("Render error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    "Failed to render the portfolio".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_not_found_and_forbidden_stay_distinct() {
        let not_found: AppError = UpstreamError::NotFound("gone".to_string()).into();
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let forbidden: AppError = UpstreamError::Forbidden("private".to_string()).into();
        assert_eq!(forbidden.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_upstream_5xx_maps_to_bad_gateway() {
        let err: AppError = UpstreamError::Api {
            status: 500,
            message: "boom".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Upstream { status: 500, .. }));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_upstream_4xx_maps_to_validation() {
        let err: AppError = UpstreamError::Api {
            status: 422,
            message: "bad field".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_unauthorized_passthrough() {
        let err: AppError = UpstreamError::Unauthorized.into();
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_timeout_maps_to_upstream_504() {
        let err: AppError = UpstreamError::Timeout("slow".to_string()).into();
        assert!(matches!(err, AppError::Upstream { status: 504, .. }));
    }
}
