// src/handlers/customer.rs
use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    Json,
};
use tracing::{debug, instrument};

use crate::analytics::boxplot::{boxplot_by_group, BoxplotStats};
use crate::analytics::rfm::segments_by_store;
use crate::dtos::customer::{
    CustomerLocation, CustomerLocationsResponse, RfmSegmentsResponse, StoreRfm,
};
use crate::dtos::store::StoreFilter;
use crate::error::AppError;
use crate::models::order::CustomerOrder;
use crate::state::AppState;

// GET /customer_locations
#[instrument(skip_all)]
pub async fn customer_locations(
    State(AppState { db_pool, .. }): State<AppState>,
) -> Result<Json<CustomerLocationsResponse>, AppError> {
    let customer_locations = sqlx::query_as::<_, CustomerLocation>(
        r#"SELECT latitude::FLOAT8 AS latitude, longitude::FLOAT8 AS longitude
        FROM customers
        WHERE latitude IS NOT NULL AND longitude IS NOT NULL
        ORDER BY latitude, longitude"#,
    )
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(CustomerLocationsResponse { customer_locations }))
}

// GET /rfm_segments?store_id=
#[instrument(skip(db_pool, reports))]
pub async fn rfm_segments(
    State(AppState { db_pool, reports }): State<AppState>,
    Query(filter): Query<StoreFilter>,
) -> Result<Json<RfmSegmentsResponse>, AppError> {
    let orders = sqlx::query_as::<_, CustomerOrder>(
        r#"SELECT o.storeid,
                o.customerid::INT8 AS customerid,
                o.orderid::INT8 AS orderid,
                o.orderdate,
                COALESCE(o.total, 0)::FLOAT8 AS total_amount
        FROM orders o
        WHERE EXTRACT(YEAR FROM o.orderdate)::INT = $1
          AND ($2::TEXT IS NULL OR o.storeid = $2)
        ORDER BY o.storeid, o.customerid, o.orderdate"#,
    )
    .bind(reports.focus_year())
    .bind(filter.store_id())
    .fetch_all(&db_pool)
    .await?;

    debug!(orders = orders.len(), year = reports.focus_year(), "Segmenting customers");

    let rfm_segments = segments_by_store(&orders)
        .into_iter()
        .map(|(storeid, rfm_data)| StoreRfm { storeid, rfm_data })
        .collect();

    Ok(Json(RfmSegmentsResponse { rfm_segments }))
}

// GET /boxplot_metrics - spread of repeat orders per customer, by pizza
#[instrument(skip_all)]
pub async fn boxplot_metrics(
    State(AppState { db_pool, .. }): State<AppState>,
) -> Result<Json<BTreeMap<String, BoxplotStats>>, AppError> {
    let rows = sqlx::query_as::<_, (String, f64)>(
        r#"SELECT p.name AS pizza_name, COUNT(*)::FLOAT8 AS order_count
        FROM orders o
        JOIN orderitems oi ON o.orderid = oi.orderid
        JOIN products p ON oi.sku = p.sku
        GROUP BY o.customerid, p.name
        HAVING COUNT(*) > 1"#,
    )
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(boxplot_by_group(rows)))
}
