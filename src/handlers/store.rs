// src/handlers/store.rs
use axum::{
    extract::{Path, Query, State},
    Json,
};
use sqlx::PgPool;
use tracing::instrument;

use crate::dtos::store::{
    RankedStore, StoreFilter, StoreIdsResponse, StoreLocation, StoreLocationsResponse,
    StoreYearlyAvgOrders, StoresResponse, Top5StoresResponse, TopStore, TopStoresQuery,
    TopStoresResponse, Worst5StoresResponse,
};
use crate::error::AppError;
use crate::models::store::Store;
use crate::state::AppState;

const DEFAULT_TOP_STORES: i64 = 10;
const MAX_TOP_STORES: i64 = 100;
const RANKING_SIZE: i64 = 5;

const STORE_COLUMNS: &str = "storeid, zipcode::TEXT AS zipcode, state_abbr, city, state,
                latitude::FLOAT8  AS latitude,
                longitude::FLOAT8 AS longitude";

#[derive(Clone, Copy)]
enum Ranking {
    Best,
    Worst,
}

impl Ranking {
    fn direction(self) -> &'static str {
        match self {
            Ranking::Best => "DESC",
            Ranking::Worst => "ASC",
        }
    }
}

// GET /store_ids
#[instrument(skip_all)]
pub async fn store_ids(
    State(AppState { db_pool, .. }): State<AppState>,
) -> Result<Json<StoreIdsResponse>, AppError> {
    let store_ids = sqlx::query_scalar::<_, String>("SELECT storeid FROM stores ORDER BY storeid")
        .fetch_all(&db_pool)
        .await?;

    Ok(Json(StoreIdsResponse { store_ids }))
}

// GET /stores
#[instrument(skip_all)]
pub async fn list_stores(
    State(AppState { db_pool, .. }): State<AppState>,
) -> Result<Json<StoresResponse>, AppError> {
    let stores = sqlx::query_as::<_, Store>(&format!(
        "SELECT {STORE_COLUMNS} FROM stores ORDER BY storeid"
    ))
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(StoresResponse { stores }))
}

// GET /stores/{store_id}
#[instrument(skip(db_pool))]
pub async fn get_store(
    State(AppState { db_pool, .. }): State<AppState>,
    Path(store_id): Path<String>,
) -> Result<Json<Store>, AppError> {
    let store = sqlx::query_as::<_, Store>(&format!(
        "SELECT {STORE_COLUMNS} FROM stores WHERE storeid = $1"
    ))
    .bind(&store_id)
    .fetch_optional(&db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Store not found"))?;

    Ok(Json(store))
}

// GET /top_stores?limit=
#[instrument(skip(db_pool))]
pub async fn top_stores(
    State(AppState { db_pool, .. }): State<AppState>,
    Query(params): Query<TopStoresQuery>,
) -> Result<Json<TopStoresResponse>, AppError> {
    let limit = params.limit.unwrap_or(DEFAULT_TOP_STORES);
    if !(1..=MAX_TOP_STORES).contains(&limit) {
        return Err(AppError::validation(&format!(
            "limit must be between 1 and {MAX_TOP_STORES}"
        )));
    }

    let top_stores = sqlx::query_as::<_, TopStore>(
        r#"SELECT s.storeid, s.zipcode::TEXT AS zipcode, s.state_abbr, s.city, s.state,
                COALESCE(SUM(o.total), 0)::FLOAT8 AS total_revenue
        FROM stores s
        JOIN orders o ON s.storeid = o.storeid
        GROUP BY s.storeid, s.zipcode, s.state_abbr, s.city, s.state
        ORDER BY total_revenue DESC, s.storeid
        LIMIT $1"#,
    )
    .bind(limit)
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(TopStoresResponse { top_stores }))
}

// GET /top_5_stores
#[instrument(skip_all)]
pub async fn top_5_stores(
    State(AppState { db_pool, reports }): State<AppState>,
) -> Result<Json<Top5StoresResponse>, AppError> {
    let top_5_stores = ranked_stores(&db_pool, &reports.years, Ranking::Best).await?;
    Ok(Json(Top5StoresResponse { top_5_stores }))
}

// GET /worst_5_stores
#[instrument(skip_all)]
pub async fn worst_5_stores(
    State(AppState { db_pool, reports }): State<AppState>,
) -> Result<Json<Worst5StoresResponse>, AppError> {
    let worst_5_stores = ranked_stores(&db_pool, &reports.years, Ranking::Worst).await?;
    Ok(Json(Worst5StoresResponse { worst_5_stores }))
}

/// Per year, the `RANKING_SIZE` stores at either end of the annual sales ranking.
async fn ranked_stores(
    db_pool: &PgPool,
    years: &[i32],
    ranking: Ranking,
) -> Result<Vec<RankedStore>, AppError> {
    let direction = ranking.direction();
    let query_str = format!(
        r#"WITH yearly_sales AS (
            SELECT storeid,
                   EXTRACT(YEAR FROM orderdate)::INT AS year,
                   COALESCE(SUM(total), 0)::FLOAT8  AS annual_sales
            FROM orders
            WHERE EXTRACT(YEAR FROM orderdate)::INT = ANY($1)
            GROUP BY storeid, EXTRACT(YEAR FROM orderdate)::INT
        )
        SELECT storeid, year, annual_sales
        FROM (
            SELECT storeid, year, annual_sales,
                   ROW_NUMBER() OVER (PARTITION BY year ORDER BY annual_sales {direction}, storeid) AS rank
            FROM yearly_sales
        ) ranked
        WHERE rank <= $2
        ORDER BY year, annual_sales {direction}, storeid"#
    );

    let stores = sqlx::query_as::<_, RankedStore>(&query_str)
        .bind(years)
        .bind(RANKING_SIZE)
        .fetch_all(db_pool)
        .await?;

    Ok(stores)
}

// GET /store_locations
#[instrument(skip_all)]
pub async fn store_locations(
    State(AppState { db_pool, .. }): State<AppState>,
) -> Result<Json<StoreLocationsResponse>, AppError> {
    let store_locations = sqlx::query_as::<_, StoreLocation>(
        r#"SELECT city,
                AVG(latitude)::FLOAT8  AS avg_latitude,
                AVG(longitude)::FLOAT8 AS avg_longitude
        FROM stores
        WHERE city IS NOT NULL AND latitude IS NOT NULL AND longitude IS NOT NULL
        GROUP BY city
        ORDER BY city"#,
    )
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(StoreLocationsResponse { store_locations }))
}

// GET /store_yearly_avg_orders?store_id=
#[instrument(skip(db_pool))]
pub async fn store_yearly_avg_orders(
    State(AppState { db_pool, .. }): State<AppState>,
    Query(filter): Query<StoreFilter>,
) -> Result<Json<Vec<StoreYearlyAvgOrders>>, AppError> {
    let rows = sqlx::query_as::<_, StoreYearlyAvgOrders>(
        r#"SELECT s.storeid, s.city,
                EXTRACT(YEAR FROM o.orderdate)::INT AS year,
                ROUND(COUNT(DISTINCT o.orderid)::NUMERIC / COUNT(DISTINCT o.customerid)::NUMERIC, 2)::FLOAT8
                    AS avg_orders_per_customer
        FROM stores s
        JOIN orders o ON s.storeid = o.storeid
        WHERE ($1::TEXT IS NULL OR s.storeid = $1)
        GROUP BY s.storeid, s.city, EXTRACT(YEAR FROM o.orderdate)::INT
        ORDER BY s.storeid, year"#,
    )
    .bind(filter.store_id())
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(rows))
}
