// src/handlers/revenue.rs
use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    Json,
};
use tracing::instrument;

use crate::dtos::revenue::{
    AnnualRevenueRow, HourlyOrders, MonthlyRevenueRow, RevenuePerWeekdayResponse,
    StoreAnnualRevenue, StoreAnnualRevenuesResponse, StoreMonthlyRevenue,
    StoreMonthlyRevenuesResponse, StoreOrdersPerHourResponse, StoreYearPoint, WeekdayRevenue,
};
use crate::dtos::store::StoreFilter;
use crate::error::AppError;
use crate::state::AppState;

// GET /store_annual_revenues
#[instrument(skip_all)]
pub async fn store_annual_revenues(
    State(AppState { db_pool, reports }): State<AppState>,
) -> Result<Json<StoreAnnualRevenuesResponse>, AppError> {
    let rows = sqlx::query_as::<_, AnnualRevenueRow>(
        r#"SELECT s.storeid, s.city,
                s.latitude::FLOAT8  AS latitude,
                s.longitude::FLOAT8 AS longitude,
                EXTRACT(YEAR FROM o.orderdate)::INT AS year,
                COALESCE(SUM(o.total), 0)::FLOAT8 AS revenue
        FROM stores s
        JOIN orders o ON s.storeid = o.storeid
        GROUP BY s.storeid, s.city, s.latitude, s.longitude, EXTRACT(YEAR FROM o.orderdate)::INT
        ORDER BY s.city, s.storeid, year"#,
    )
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(StoreAnnualRevenuesResponse {
        store_annual_revenues: pivot_annual_revenues(rows, &reports.annual_revenue_years),
    }))
}

/// One entry per store (first-seen order) with a `revenue_<year>` column for every
/// requested year. Years without orders read 0; years not requested are dropped.
pub fn pivot_annual_revenues(rows: Vec<AnnualRevenueRow>, years: &[i32]) -> Vec<StoreAnnualRevenue> {
    let mut stores: Vec<StoreAnnualRevenue> = Vec::new();
    let mut index: BTreeMap<String, usize> = BTreeMap::new();

    for row in rows {
        let slot = *index.entry(row.storeid.clone()).or_insert_with(|| {
            stores.push(StoreAnnualRevenue {
                storeid: row.storeid.clone(),
                city: row.city.clone(),
                latitude: row.latitude,
                longitude: row.longitude,
                revenues: years.iter().map(|y| (revenue_column(*y), 0.0)).collect(),
            });
            stores.len() - 1
        });

        if years.contains(&row.year) {
            if let Some(store) = stores.get_mut(slot) {
                store.revenues.insert(revenue_column(row.year), row.revenue);
            }
        }
    }

    stores
}

fn revenue_column(year: i32) -> String {
    format!("revenue_{year}")
}

// GET /store_monthly_revenues?store_id=
#[instrument(skip(db_pool))]
pub async fn store_monthly_revenues(
    State(AppState { db_pool, .. }): State<AppState>,
    Query(filter): Query<StoreFilter>,
) -> Result<Json<StoreMonthlyRevenuesResponse>, AppError> {
    let rows = sqlx::query_as::<_, MonthlyRevenueRow>(
        r#"SELECT s.storeid, s.city,
                s.latitude::FLOAT8  AS latitude,
                s.longitude::FLOAT8 AS longitude,
                to_char(o.orderdate, 'YYYY-MM') AS month,
                COALESCE(SUM(o.total), 0)::FLOAT8 AS revenue
        FROM stores s
        JOIN orders o ON s.storeid = o.storeid
        WHERE ($1::TEXT IS NULL OR s.storeid = $1)
        GROUP BY s.storeid, s.city, s.latitude, s.longitude, to_char(o.orderdate, 'YYYY-MM')
        ORDER BY s.city, s.storeid, month"#,
    )
    .bind(filter.store_id())
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(StoreMonthlyRevenuesResponse {
        store_monthly_revenues: group_monthly_revenues(rows),
    }))
}

/// Fold per-month rows into one entry per store, keeping first-seen store order.
pub fn group_monthly_revenues(rows: Vec<MonthlyRevenueRow>) -> Vec<StoreMonthlyRevenue> {
    let mut stores: Vec<StoreMonthlyRevenue> = Vec::new();

    for row in rows {
        match stores.iter_mut().rev().find(|s| s.storeid == row.storeid) {
            Some(store) => {
                *store.monthly_revenues.entry(row.month).or_insert(0.0) += row.revenue;
            }
            None => stores.push(StoreMonthlyRevenue {
                storeid: row.storeid,
                city: row.city,
                latitude: row.latitude,
                longitude: row.longitude,
                monthly_revenues: BTreeMap::from([(row.month, row.revenue)]),
            }),
        }
    }

    stores
}

// GET /revenue_per_weekday?store_id=
#[instrument(skip(db_pool, reports))]
pub async fn revenue_per_weekday(
    State(AppState { db_pool, reports }): State<AppState>,
    Query(filter): Query<StoreFilter>,
) -> Result<Json<RevenuePerWeekdayResponse>, AppError> {
    // DOW is 0 = Sunday; shift so the week starts on Monday.
    let revenue_per_weekday = sqlx::query_as::<_, WeekdayRevenue>(
        r#"SELECT o.storeid,
                ((EXTRACT(DOW FROM o.orderdate)::INT + 6) % 7) AS order_day_of_week,
                EXTRACT(YEAR FROM o.orderdate)::INT AS order_year,
                COALESCE(SUM(o.total), 0)::FLOAT8 AS total_revenue
        FROM orders o
        WHERE EXTRACT(YEAR FROM o.orderdate)::INT = ANY($1)
          AND ($2::TEXT IS NULL OR o.storeid = $2)
        GROUP BY o.storeid, order_day_of_week, order_year
        ORDER BY o.storeid, order_year, order_day_of_week"#,
    )
    .bind(reports.years.as_slice())
    .bind(filter.store_id())
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(RevenuePerWeekdayResponse { revenue_per_weekday }))
}

// GET /store_orders_per_hour?store_id=
#[instrument(skip(db_pool, reports))]
pub async fn store_orders_per_hour(
    State(AppState { db_pool, reports }): State<AppState>,
    Query(filter): Query<StoreFilter>,
) -> Result<Json<StoreOrdersPerHourResponse>, AppError> {
    // Order timestamps are stored in UTC. Hour and year are both taken from
    // the stores' local time, so a late New Year's Eve order stays in its year.
    let store_orders_per_hour = sqlx::query_as::<_, HourlyOrders>(
        r#"WITH local_orders AS (
            SELECT storeid, orderdate AT TIME ZONE 'UTC' AT TIME ZONE $3::TEXT AS local_time
            FROM orders
            WHERE ($2::TEXT IS NULL OR storeid = $2)
        )
        SELECT storeid,
                EXTRACT(HOUR FROM local_time)::INT AS order_hour,
                EXTRACT(YEAR FROM local_time)::INT AS order_year,
                COUNT(*)::INT8 AS total_orders_per_hour
        FROM local_orders
        WHERE EXTRACT(YEAR FROM local_time)::INT = ANY($1)
        GROUP BY storeid, order_hour, order_year
        ORDER BY storeid, order_year, order_hour"#,
    )
    .bind(reports.years.as_slice())
    .bind(filter.store_id())
    .bind(reports.timezone.as_str())
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(StoreOrdersPerHourResponse { store_orders_per_hour }))
}

// GET /scatterplot
#[instrument(skip_all)]
pub async fn scatterplot(
    State(AppState { db_pool, .. }): State<AppState>,
) -> Result<Json<Vec<StoreYearPoint>>, AppError> {
    let points = sqlx::query_as::<_, StoreYearPoint>(
        r#"SELECT o.storeid,
                EXTRACT(YEAR FROM o.orderdate)::INT AS year,
                COALESCE(SUM(o.total), 0)::FLOAT8 AS revenue,
                COUNT(DISTINCT o.orderid)::INT8 AS order_count
        FROM orders o
        GROUP BY o.storeid, EXTRACT(YEAR FROM o.orderdate)::INT
        ORDER BY o.storeid, year"#,
    )
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(points))
}
