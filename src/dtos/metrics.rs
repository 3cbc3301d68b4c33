// src/dtos/metrics.rs
use serde::Serialize;

/// Headline KPIs for the dashboard's summary cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsResponse {
    pub year: i32,
    pub previous_year: i32,

    // All-time
    pub total_customers: i64,
    pub total_revenue: f64,
    pub average_revenue_per_store: f64,

    // Focus year vs. previous year
    pub median_store_revenue: f64,
    pub new_customers: i64,
    pub new_customers_previous: i64,
    pub new_customers_change: f64,
    pub year_revenue: f64,
    pub year_revenue_change: f64,
    pub avg_revenue_per_store_year: f64,
    pub avg_revenue_per_store_change: f64,
}
