//! Order pricing command.

use std::path::Path;

use erp_dashboard_core::pricing::PricedLine;
use erp_dashboard_core::{CurrencyCode, Money, OrderItem, PricingError, price_order};
use serde::Serialize;
use tracing::info;

use super::print_json;

/// Priced order as printed to stdout.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub lines: Vec<PricedLine>,
    pub total: Money,
    pub display: String,
}

/// Price the items in `file` and print the summary.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if any item is
/// rejected by the calculator.
pub async fn total(
    file: &Path,
    currency: CurrencyCode,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let content = tokio::fs::read_to_string(file).await?;
    let items: Vec<OrderItem> = serde_json::from_str(&content)?;
    info!(items = items.len(), "Pricing order");

    let summary = summarize(&items, currency)?;
    print_json(&summary)?;
    Ok(())
}

fn summarize(items: &[OrderItem], currency: CurrencyCode) -> Result<OrderSummary, PricingError> {
    let priced = price_order(items)?;
    let total = Money::new(priced.total, currency);

    Ok(OrderSummary {
        lines: priced.lines,
        display: total.display(),
        total,
    })
}
