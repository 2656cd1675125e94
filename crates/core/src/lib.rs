//! ERP Dashboard Core - Pricing and address catalog logic.
//!
//! This crate holds the business rules behind the dashboard's order forms and
//! address pickers:
//! - `server` - HTTP API consumed by the dashboard front end
//! - `cli` - Dataset validation and ad-hoc order pricing
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no network, no
//! database, no filesystem access. The default address dataset is compiled in.
//!
//! # Modules
//!
//! - [`types`] - Money, order items, and address nodes
//! - [`pricing`] - Line subtotals and order totals
//! - [`address`] - Indexed, read-only address catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod address;
pub mod pricing;
pub mod types;

pub use address::{AddressCatalog, CatalogError};
pub use pricing::{PricingError, item_subtotal, order_total, price_order};
pub use types::{AddressLevel, AddressNode, CurrencyCode, Money, OrderItem};
