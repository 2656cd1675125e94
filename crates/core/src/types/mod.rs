//! Core types for the ERP dashboard.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod address;
pub mod money;
pub mod order;

pub use address::{AddressLevel, AddressNode};
pub use money::{CurrencyCode, Money};
pub use order::OrderItem;
