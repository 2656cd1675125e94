//! Line item subtotals and order totals.
//!
//! All arithmetic is exact [`Decimal`] arithmetic. Inputs are checked for
//! negative values; `Decimal` has no NaN or infinity, so non-finite input is
//! already rejected when a request is deserialized.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::types::OrderItem;

/// Errors raised while pricing an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// A line item carries a value the calculator refuses to price.
    #[error("invalid order item at line {index}: {reason}")]
    InvalidOrderItem {
        /// Zero-based position of the offending item.
        index: usize,
        /// What is wrong with it.
        reason: InvalidItemReason,
    },
    /// The result does not fit in a `Decimal`.
    #[error("order amount overflow")]
    Overflow,
}

/// Why a line item was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidItemReason {
    #[error("quantity must not be negative")]
    NegativeQuantity,
    #[error("unit price must not be negative")]
    NegativeUnitPrice,
}

/// One priced line of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedLine {
    pub quantity: Decimal,
    /// The price used for the computation (zero when the item had none).
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

/// Every line with its subtotal, plus the grand total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricedOrder {
    pub lines: Vec<PricedLine>,
    pub total: Decimal,
}

/// Compute `quantity * unit_price`, treating a missing price as zero.
///
/// Zero quantity or zero price is not an error; the result is simply zero.
///
/// # Errors
///
/// Returns [`PricingError::InvalidOrderItem`] (with index 0) for a negative
/// quantity or price, and [`PricingError::Overflow`] if the product does not
/// fit in a `Decimal`.
pub fn item_subtotal(
    quantity: Decimal,
    unit_price: Option<Decimal>,
) -> Result<Decimal, PricingError> {
    line_subtotal(0, quantity, unit_price.unwrap_or(Decimal::ZERO))
}

/// Sum the subtotals of `items`, left to right.
///
/// An empty slice totals zero. The slice is only borrowed.
///
/// # Errors
///
/// Returns [`PricingError::InvalidOrderItem`] naming the first offending line,
/// or [`PricingError::Overflow`].
pub fn order_total(items: &[OrderItem]) -> Result<Decimal, PricingError> {
    items
        .iter()
        .enumerate()
        .try_fold(Decimal::ZERO, |total, (index, item)| {
            let subtotal =
                line_subtotal(index, item.quantity, item.unit_price.unwrap_or(Decimal::ZERO))?;
            total.checked_add(subtotal).ok_or(PricingError::Overflow)
        })
}

/// Price every line and total the order in one pass.
///
/// `price_order(items)?.total == order_total(items)?` always holds.
///
/// # Errors
///
/// Same as [`order_total`].
pub fn price_order(items: &[OrderItem]) -> Result<PricedOrder, PricingError> {
    let mut lines = Vec::with_capacity(items.len());
    let mut total = Decimal::ZERO;

    for (index, item) in items.iter().enumerate() {
        let unit_price = item.unit_price.unwrap_or(Decimal::ZERO);
        let subtotal = line_subtotal(index, item.quantity, unit_price)?;
        total = total.checked_add(subtotal).ok_or(PricingError::Overflow)?;
        lines.push(PricedLine {
            quantity: item.quantity,
            unit_price,
            subtotal,
        });
    }

    Ok(PricedOrder { lines, total })
}

fn line_subtotal(
    index: usize,
    quantity: Decimal,
    unit_price: Decimal,
) -> Result<Decimal, PricingError> {
    if quantity < Decimal::ZERO {
        return Err(PricingError::InvalidOrderItem {
            index,
            reason: InvalidItemReason::NegativeQuantity,
        });
    }
    if unit_price < Decimal::ZERO {
        return Err(PricingError::InvalidOrderItem {
            index,
            reason: InvalidItemReason::NegativeUnitPrice,
        });
    }

    quantity.checked_mul(unit_price).ok_or(PricingError::Overflow)
}
