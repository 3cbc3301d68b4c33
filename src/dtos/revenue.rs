// src/dtos/revenue.rs
use std::collections::BTreeMap;

use serde::Serialize;
use sqlx::FromRow;

/// Revenue of one store in one year, before pivoting into columns.
#[derive(Debug, Clone, FromRow)]
pub struct AnnualRevenueRow {
    pub storeid: String,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub year: i32,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreAnnualRevenue {
    pub storeid: String,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// `revenue_<year>` columns.
    #[serde(flatten)]
    pub revenues: BTreeMap<String, f64>,
}

#[derive(Debug, Serialize)]
pub struct StoreAnnualRevenuesResponse {
    pub store_annual_revenues: Vec<StoreAnnualRevenue>,
}

#[derive(Debug, Clone, FromRow)]
pub struct MonthlyRevenueRow {
    pub storeid: String,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub month: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreMonthlyRevenue {
    pub storeid: String,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Keyed by `YYYY-MM`.
    pub monthly_revenues: BTreeMap<String, f64>,
}

#[derive(Debug, Serialize)]
pub struct StoreMonthlyRevenuesResponse {
    pub store_monthly_revenues: Vec<StoreMonthlyRevenue>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct WeekdayRevenue {
    pub storeid: String,
    /// 0 = Monday .. 6 = Sunday
    pub order_day_of_week: i32,
    pub order_year: i32,
    pub total_revenue: f64,
}

#[derive(Debug, Serialize)]
pub struct RevenuePerWeekdayResponse {
    pub revenue_per_weekday: Vec<WeekdayRevenue>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct HourlyOrders {
    pub storeid: String,
    pub order_hour: i32,
    pub order_year: i32,
    pub total_orders_per_hour: i64,
}

#[derive(Debug, Serialize)]
pub struct StoreOrdersPerHourResponse {
    pub store_orders_per_hour: Vec<HourlyOrders>,
}

/// Store-year point for the revenue vs. order count scatter chart.
#[derive(Debug, Serialize, FromRow)]
pub struct StoreYearPoint {
    pub storeid: String,
    pub year: i32,
    pub revenue: f64,
    pub order_count: i64,
}
