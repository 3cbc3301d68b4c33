// src/dtos/store.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::store::Store;

/// Optional `?store_id=` narrowing shared by the per-store reports.
#[derive(Debug, Default, Deserialize)]
pub struct StoreFilter {
    pub store_id: Option<String>,
}

impl StoreFilter {
    /// Blank ids mean "all stores".
    pub fn store_id(&self) -> Option<&str> {
        self.store_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct TopStoresQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct StoreIdsResponse {
    pub store_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct StoresResponse {
    pub stores: Vec<Store>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct TopStore {
    pub storeid: String,
    pub zipcode: Option<String>,
    pub state_abbr: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub total_revenue: f64,
}

#[derive(Debug, Serialize)]
pub struct TopStoresResponse {
    pub top_stores: Vec<TopStore>,
}

/// One store's position in a single year's sales ranking.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct RankedStore {
    pub storeid: String,
    pub year: i32,
    pub annual_sales: f64,
}

#[derive(Debug, Serialize)]
pub struct Top5StoresResponse {
    pub top_5_stores: Vec<RankedStore>,
}

#[derive(Debug, Serialize)]
pub struct Worst5StoresResponse {
    pub worst_5_stores: Vec<RankedStore>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct StoreLocation {
    pub city: String,
    pub avg_latitude: f64,
    pub avg_longitude: f64,
}

#[derive(Debug, Serialize)]
pub struct StoreLocationsResponse {
    pub store_locations: Vec<StoreLocation>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct StoreYearlyAvgOrders {
    pub storeid: String,
    pub city: Option<String>,
    pub year: i32,
    pub avg_orders_per_customer: f64,
}
