//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side failures to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`; every error is rendered as the JSON envelope
//! `{ "success": false, "error": "<message>" }`.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use erp_dashboard_core::PricingError;
use thiserror::Error;

use crate::response::ApiResponse;

/// Message shown when the address dataset cannot be served.
pub const ADDRESS_DATA_UNAVAILABLE: &str = "获取地址数据失败";

/// Message shown for any other server-side failure.
pub const INTERNAL_ERROR: &str = "服务器内部错误";

/// Message shown when a client exceeds the API rate limit.
pub const RATE_LIMITED: &str = "请求过于频繁，请稍后再试";

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// The address dataset failed to load at startup.
    #[error("Address dataset unavailable")]
    DataUnavailable,

    /// An order item was rejected by the pricing calculator.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] PricingError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Client exceeded the rate limit; retry after the given seconds.
    #[error("Rate limited: retry after {0}s")]
    RateLimited(u64),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::DataUnavailable | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    /// Message safe to show to the client.
    #[must_use]
    pub fn public_message(&self) -> String {
        // Don't expose internal error details to clients
        match self {
            Self::DataUnavailable => ADDRESS_DATA_UNAVAILABLE.to_string(),
            Self::Internal(_) => INTERNAL_ERROR.to_string(),
            Self::RateLimited(_) => RATE_LIMITED.to_string(),
            Self::InvalidInput(err) => err.to_string(),
            Self::NotFound(_) | Self::BadRequest(_) => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::DataUnavailable | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let body = ApiResponse::<()>::failure(self.public_message());
        (self.status(), Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use erp_dashboard_core::pricing::InvalidItemReason;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("address 999999".to_string());
        assert_eq!(err.to_string(), "Not found: address 999999");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::DataUnavailable),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::InvalidInput(PricingError::Overflow)),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::RateLimited(30)),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[tokio::test]
    async fn test_rate_limited_body() {
        let body = body_json(AppError::RateLimited(30).into_response()).await;
        assert_eq!(
            body,
            serde_json::json!({"success": false, "error": RATE_LIMITED})
        );
    }

    #[tokio::test]
    async fn test_data_unavailable_body_is_generic() {
        let body = body_json(AppError::DataUnavailable.into_response()).await;
        assert_eq!(
            body,
            serde_json::json!({"success": false, "error": ADDRESS_DATA_UNAVAILABLE})
        );
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response = AppError::Internal("connection refused on 10.0.0.4".to_string())
            .into_response();
        let body = body_json(response).await;
        assert_eq!(body["error"], INTERNAL_ERROR);
    }

    #[tokio::test]
    async fn test_invalid_input_names_the_line() {
        let err = AppError::from(PricingError::InvalidOrderItem {
            index: 1,
            reason: InvalidItemReason::NegativeQuantity,
        });
        let body = body_json(err.into_response()).await;
        assert_eq!(body["success"], false);
        assert_eq!(
            body["error"],
            "invalid order item at line 1: quantity must not be negative"
        );
    }
}
