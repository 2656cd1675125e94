//! Rate limiting middleware using governor and `tower_governor`.
//!
//! One limiter guards the whole API, keyed by client IP. Limits come from
//! [`RateLimitConfig`]. Rejections are rendered through [`AppError`] so they
//! carry the same JSON envelope as every other API reply.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, Response};
use axum::response::IntoResponse;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::{GovernorError, GovernorLayer, governor::GovernorConfigBuilder};

use crate::config::RateLimitConfig;
use crate::error::AppError;

// =============================================================================
// Client IP Key Extractor
// =============================================================================

/// Key extractor that prefers reverse-proxy headers and falls back to the
/// peer address of the TCP connection.
///
/// The fallback needs the server to be run with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
#[derive(Clone, Copy)]
pub struct ClientIpKeyExtractor;

impl tower_governor::key_extractor::KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        let headers = req.headers();

        // Try X-Forwarded-For (first IP in the chain)
        if let Some(ip) = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.split(',').next())
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
        {
            return Ok(ip);
        }

        // Try X-Real-IP
        if let Some(ip) = headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
        {
            return Ok(ip);
        }

        req.extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip())
            .ok_or(GovernorError::UnableToExtractKey)
    }
}

// =============================================================================
// Rate Limiter Configuration
// =============================================================================

/// Rate limiter layer type for Axum.
pub type RateLimiterLayer =
    GovernorLayer<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>, Body>;

/// Create the API rate limiter from configuration.
///
/// One token is replenished every `per_second` seconds, up to `burst_size`.
///
/// # Panics
///
/// Panics only if `per_second` or `burst_size` is zero, which
/// `ServerConfig::from_env` rejects before the limiter is built.
#[must_use]
pub fn api_rate_limiter(config: RateLimitConfig) -> RateLimiterLayer {
    let governor = GovernorConfigBuilder::default()
        .key_extractor(ClientIpKeyExtractor)
        .per_second(config.per_second)
        .burst_size(config.burst_size)
        .finish()
        .expect("rate limiter config with non-zero period and burst is valid");
    GovernorLayer::new(Arc::new(governor)).error_handler(rate_limit_error)
}

/// Render a limiter rejection as an API error, keeping the retry headers.
fn rate_limit_error(error: GovernorError) -> Response<Body> {
    match error {
        GovernorError::TooManyRequests { wait_time, headers } => {
            let mut response = AppError::RateLimited(wait_time).into_response();
            if let Some(headers) = headers {
                response.headers_mut().extend(headers);
            }
            response
        }
        GovernorError::UnableToExtractKey => {
            AppError::Internal("unable to determine client IP for rate limiting".to_string())
                .into_response()
        }
        GovernorError::Other { code, msg, .. } => AppError::Internal(format!(
            "rate limiter error ({code}): {}",
            msg.unwrap_or_default()
        ))
        .into_response(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::{HeaderMap, StatusCode, header};
    use erp_dashboard_core::AddressCatalog;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use tower_governor::key_extractor::KeyExtractor;

    use super::*;
    use crate::config::ServerConfig;
    use crate::error::{INTERNAL_ERROR, RATE_LIMITED};
    use crate::state::AppState;

    fn request() -> axum::http::request::Builder {
        Request::builder().uri("/address/provinces")
    }

    #[test]
    fn test_forwarded_for_takes_first_hop() {
        let req = request()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .body(())
            .unwrap();
        let ip = ClientIpKeyExtractor.extract(&req).unwrap();
        assert_eq!(ip, "203.0.113.7".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_real_ip() {
        let req = request().header("x-real-ip", "198.51.100.2").body(()).unwrap();
        let ip = ClientIpKeyExtractor.extract(&req).unwrap();
        assert_eq!(ip, "198.51.100.2".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_connect_info_fallback() {
        let mut req = request().body(()).unwrap();
        req.extensions_mut()
            .insert(ConnectInfo("192.0.2.9:51234".parse::<SocketAddr>().unwrap()));
        let ip = ClientIpKeyExtractor.extract(&req).unwrap();
        assert_eq!(ip, "192.0.2.9".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_no_key() {
        let req = request().body(()).unwrap();
        assert!(ClientIpKeyExtractor.extract(&req).is_err());
    }

    async fn send(app: axum::Router, req: Request<Body>) -> (StatusCode, HeaderMap, Value) {
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, headers, serde_json::from_slice(&bytes).unwrap())
    }

    fn limited_app() -> axum::Router {
        let config = ServerConfig {
            rate_limit: RateLimitConfig {
                per_second: 60,
                burst_size: 1,
            },
            ..ServerConfig::default()
        };
        crate::app(AppState::new(config, Some(AddressCatalog::embedded().unwrap())))
    }

    fn provinces_from(ip: &str) -> Request<Body> {
        request()
            .header("x-forwarded-for", ip)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_exceeding_burst_returns_enveloped_429() {
        let app = limited_app();

        let (status, _, body) = send(app.clone(), provinces_from("203.0.113.7")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, headers, body) = send(app, provinces_from("203.0.113.7")).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body, json!({"success": false, "error": RATE_LIMITED}));
        assert!(headers.contains_key(header::RETRY_AFTER));
        assert_eq!(
            headers.get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    async fn test_limit_is_per_client() {
        let app = limited_app();

        let (status, _, _) = send(app.clone(), provinces_from("203.0.113.7")).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _, _) = send(app, provinces_from("198.51.100.2")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_client_is_enveloped_500() {
        let app = limited_app();
        let req = request().body(Body::empty()).unwrap();

        let (status, _, body) = send(app, req).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"success": false, "error": INTERNAL_ERROR}));
    }
}
