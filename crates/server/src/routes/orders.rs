//! Order pricing handler.
//!
//! The sales order, return order, and shipment forms post their line items
//! here and render the returned subtotals and grand total.

use axum::{Json, extract::State};
use erp_dashboard_core::{CurrencyCode, Money, OrderItem, pricing::PricedLine, price_order};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::extract::ApiJson;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Request body for `POST /orders/total`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotalRequest {
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// Overrides the configured default currency.
    pub currency_code: Option<CurrencyCode>,
}

/// Priced order returned to the form.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotalResponse {
    pub lines: Vec<PricedLine>,
    pub total: Decimal,
    pub currency_code: CurrencyCode,
    /// Total formatted for display, e.g. "¥40.00".
    pub display: String,
}

/// Price the posted line items.
#[instrument(skip(state, request), fields(items = request.items.len()))]
pub async fn total(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<OrderTotalRequest>,
) -> Result<Json<ApiResponse<OrderTotalResponse>>> {
    let currency_code = request.currency_code.unwrap_or(state.config().currency);
    let priced = price_order(&request.items)?;
    let money = Money::new(priced.total, currency_code);

    tracing::debug!(total = %priced.total, currency = %currency_code, "Priced order");

    Ok(Json(ApiResponse::ok(OrderTotalResponse {
        lines: priced.lines,
        total: priced.total,
        currency_code,
        display: money.display(),
    })))
}
