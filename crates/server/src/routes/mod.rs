//! HTTP route handlers for the dashboard API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                             - Liveness check
//! GET  /health/ready                       - Readiness (address dataset loaded)
//!
//! # Address lookup
//! GET  /address/provinces                  - All provinces
//! GET  /address/cities?provinceCode=...    - Cities of a province
//! GET  /address/districts?cityCode=...     - Districts of a city
//! GET  /address/nodes/{code}               - Single node by code
//!
//! # Orders
//! POST /orders/total                       - Price line items and total the order
//! ```

pub mod address;
pub mod health;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the address routes router.
pub fn address_routes() -> Router<AppState> {
    Router::new()
        .route("/provinces", get(address::provinces))
        .route("/cities", get(address::cities))
        .route("/districts", get(address::districts))
        .route("/nodes/{code}", get(address::node))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new().route("/total", post(orders::total))
}

/// Create all API routes.
///
/// Health checks are mounted separately in [`crate::app`] so they sit outside
/// the rate limiter.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/address", address_routes())
        .nest("/orders", order_routes())
}
