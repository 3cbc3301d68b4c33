// src/handlers/metrics.rs
use std::collections::HashMap;

use axum::{extract::State, Json};
use sqlx::PgPool;
use tracing::instrument;

use crate::analytics::kpi::{average, median, percent_change};
use crate::dtos::metrics::MetricsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Revenue, active stores and first-time customers of one calendar year.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct YearFigures {
    pub revenue: f64,
    pub active_stores: i64,
    pub new_customers: i64,
}

/// Raw figures the KPI cards are derived from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsSnapshot {
    pub year: i32,
    pub previous_year: i32,
    pub total_customers: i64,
    pub total_revenue: f64,
    pub active_stores: i64,
    pub store_revenues: Vec<f64>,
    pub current: YearFigures,
    pub previous: YearFigures,
}

impl MetricsSnapshot {
    pub fn into_response(self) -> MetricsResponse {
        let avg_current = average(self.current.revenue, self.current.active_stores);
        let avg_previous = average(self.previous.revenue, self.previous.active_stores);

        MetricsResponse {
            year: self.year,
            previous_year: self.previous_year,
            total_customers: self.total_customers,
            total_revenue: self.total_revenue,
            average_revenue_per_store: average(self.total_revenue, self.active_stores),
            median_store_revenue: median(&self.store_revenues).unwrap_or(0.0),
            new_customers: self.current.new_customers,
            new_customers_previous: self.previous.new_customers,
            new_customers_change: percent_change(
                self.previous.new_customers as f64,
                self.current.new_customers as f64,
            ),
            year_revenue: self.current.revenue,
            year_revenue_change: percent_change(self.previous.revenue, self.current.revenue),
            avg_revenue_per_store_year: avg_current,
            avg_revenue_per_store_change: percent_change(avg_previous, avg_current),
        }
    }
}

// GET /metrics
#[instrument(skip_all)]
pub async fn get_metrics(
    State(AppState { db_pool, reports }): State<AppState>,
) -> Result<Json<MetricsResponse>, AppError> {
    let year = reports.focus_year();
    let previous_year = reports.previous_year();
    let years = [previous_year, year];

    let (total_customers, (total_revenue, active_stores), store_revenues, mut by_year) = tokio::try_join!(
        count_customers(&db_pool),
        revenue_totals(&db_pool),
        store_revenues(&db_pool, year),
        year_figures(&db_pool, &years),
    )?;

    let snapshot = MetricsSnapshot {
        year,
        previous_year,
        total_customers,
        total_revenue,
        active_stores,
        store_revenues,
        current: by_year.remove(&year).unwrap_or_default(),
        previous: by_year.remove(&previous_year).unwrap_or_default(),
    };

    Ok(Json(snapshot.into_response()))
}

async fn count_customers(db_pool: &PgPool) -> Result<i64, AppError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers")
        .fetch_one(db_pool)
        .await
        .map_err(AppError::db)?;
    Ok(count)
}

async fn revenue_totals(db_pool: &PgPool) -> Result<(f64, i64), AppError> {
    let totals = sqlx::query_as::<_, (f64, i64)>(
        "SELECT COALESCE(SUM(total), 0)::FLOAT8, COUNT(DISTINCT storeid) FROM orders",
    )
    .fetch_one(db_pool)
    .await
    .map_err(AppError::db)?;
    Ok(totals)
}

async fn store_revenues(db_pool: &PgPool, year: i32) -> Result<Vec<f64>, AppError> {
    let revenues = sqlx::query_scalar::<_, f64>(
        r#"SELECT COALESCE(SUM(total), 0)::FLOAT8
        FROM orders
        WHERE EXTRACT(YEAR FROM orderdate)::INT = $1
        GROUP BY storeid"#,
    )
    .bind(year)
    .fetch_all(db_pool)
    .await
    .map_err(AppError::db)?;
    Ok(revenues)
}

async fn year_figures(
    db_pool: &PgPool,
    years: &[i32],
) -> Result<HashMap<i32, YearFigures>, AppError> {
    let revenue_rows = sqlx::query_as::<_, (i32, f64, i64)>(
        r#"SELECT EXTRACT(YEAR FROM orderdate)::INT AS year,
                COALESCE(SUM(total), 0)::FLOAT8 AS revenue,
                COUNT(DISTINCT storeid) AS active_stores
        FROM orders
        WHERE EXTRACT(YEAR FROM orderdate)::INT = ANY($1)
        GROUP BY year"#,
    )
    .bind(years)
    .fetch_all(db_pool)
    .await
    .map_err(AppError::db)?;

    // A customer is new in the year of their first ever order.
    let newcomer_rows = sqlx::query_as::<_, (i32, i64)>(
        r#"WITH first_orders AS (
            SELECT customerid, MIN(orderdate) AS first_order
            FROM orders
            GROUP BY customerid
        )
        SELECT EXTRACT(YEAR FROM first_order)::INT AS year, COUNT(*) AS new_customers
        FROM first_orders
        WHERE EXTRACT(YEAR FROM first_order)::INT = ANY($1)
        GROUP BY year"#,
    )
    .bind(years)
    .fetch_all(db_pool)
    .await
    .map_err(AppError::db)?;

    let mut figures: HashMap<i32, YearFigures> = HashMap::new();
    for (year, revenue, active_stores) in revenue_rows {
        let entry = figures.entry(year).or_default();
        entry.revenue = revenue;
        entry.active_stores = active_stores;
    }
    for (year, new_customers) in newcomer_rows {
        figures.entry(year).or_default().new_customers = new_customers;
    }

    Ok(figures)
}
