//! Order line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::{self, PricingError};

/// One line of a sales order, return order, or factory shipment.
///
/// Only the fields that take part in pricing are modelled here. The subtotal
/// is never stored; call [`OrderItem::subtotal`] when it is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Number of units (may be fractional, e.g. tonnes on a shipment).
    pub quantity: Decimal,
    /// Price per unit. A missing price counts as zero.
    #[serde(default)]
    pub unit_price: Option<Decimal>,
}

impl OrderItem {
    /// Create a line item with a unit price.
    #[must_use]
    pub const fn new(quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            quantity,
            unit_price: Some(unit_price),
        }
    }

    /// Create a line item that has no price yet.
    #[must_use]
    pub const fn unpriced(quantity: Decimal) -> Self {
        Self {
            quantity,
            unit_price: None,
        }
    }

    /// `quantity * unit_price`, computed fresh on every call.
    ///
    /// # Errors
    ///
    /// See [`pricing::item_subtotal`].
    pub fn subtotal(&self) -> Result<Decimal, PricingError> {
        pricing::item_subtotal(self.quantity, self.unit_price)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_accepts_numbers_and_strings() {
        let item: OrderItem =
            serde_json::from_str(r#"{"quantity": 3, "unitPrice": "10.25"}"#).unwrap();
        assert_eq!(item.quantity, Decimal::from(3));
        assert_eq!(item.unit_price, Some(Decimal::new(1025, 2)));
    }

    #[test]
    fn test_deserialize_missing_price() {
        let item: OrderItem = serde_json::from_str(r#"{"quantity": 2}"#).unwrap();
        assert_eq!(item.unit_price, None);
        assert_eq!(item.subtotal().unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_deserialize_null_price() {
        let item: OrderItem =
            serde_json::from_str(r#"{"quantity": 2, "unitPrice": null}"#).unwrap();
        assert_eq!(item.unit_price, None);
    }

    #[test]
    fn test_subtotal() {
        let item = OrderItem::new(Decimal::from(3), Decimal::from(10));
        assert_eq!(item.subtotal().unwrap(), Decimal::from(30));
    }
}
