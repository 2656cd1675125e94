//! Address lookup handlers.
//!
//! Provinces, cities, and districts are served from the shared
//! [`AddressCatalog`](erp_dashboard_core::AddressCatalog). Unknown parent codes
//! yield an empty list, never an error, so stale client-side codes degrade
//! gracefully.

use axum::{
    Json,
    extract::{Path, State},
};
use erp_dashboard_core::AddressNode;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::extract::ApiQuery;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Query for the city listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitiesQuery {
    pub province_code: String,
}

/// Query for the district listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictsQuery {
    pub city_code: String,
}

/// List every province.
#[instrument(skip(state))]
pub async fn provinces(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<AddressNode>>>> {
    let provinces = state.catalog()?.list_provinces();
    Ok(Json(ApiResponse::ok(provinces)))
}

/// List the cities of a province.
#[instrument(skip(state))]
pub async fn cities(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CitiesQuery>,
) -> Result<Json<ApiResponse<Vec<AddressNode>>>> {
    let cities = state.catalog()?.list_cities(&query.province_code);
    tracing::debug!(count = cities.len(), "Listed cities");
    Ok(Json(ApiResponse::ok(cities)))
}

/// List the districts of a city.
#[instrument(skip(state))]
pub async fn districts(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DistrictsQuery>,
) -> Result<Json<ApiResponse<Vec<AddressNode>>>> {
    let districts = state.catalog()?.list_districts(&query.city_code);
    tracing::debug!(count = districts.len(), "Listed districts");
    Ok(Json(ApiResponse::ok(districts)))
}

/// Look up a single node by code.
#[instrument(skip(state))]
pub async fn node(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<AddressNode>>> {
    let node = state
        .catalog()?
        .get(&code)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("address {code}")))?;
    Ok(Json(ApiResponse::ok(node)))
}
