// src/handlers/product.rs
use axum::{extract::State, Json};
use tracing::instrument;

use crate::dtos::product::{
    CategoryOrders, PizzaOrdersResponse, PizzaSales, PizzaTypeRevenue, ProductsResponse,
    RevenuesByPizzaTypeResponse,
};
use crate::error::AppError;
use crate::models::product::Product;
use crate::state::AppState;

// GET /products - the menu
#[instrument(skip_all)]
pub async fn list_products(
    State(AppState { db_pool, .. }): State<AppState>,
) -> Result<Json<ProductsResponse>, AppError> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT sku, name, category, size, price::FLOAT8 AS price
         FROM products ORDER BY category, name, sku",
    )
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(ProductsResponse { products }))
}

// GET /pizza_orders - units sold per category and year
#[instrument(skip_all)]
pub async fn pizza_orders(
    State(AppState { db_pool, reports }): State<AppState>,
) -> Result<Json<PizzaOrdersResponse>, AppError> {
    let pizza_orders_by_category = sqlx::query_as::<_, CategoryOrders>(
        r#"SELECT p.category AS pizza_category,
                EXTRACT(YEAR FROM o.orderdate)::INT AS order_year,
                COUNT(*)::INT8 AS total_orders
        FROM orderitems oi
        JOIN products p ON oi.sku = p.sku
        JOIN orders o ON oi.orderid = o.orderid
        WHERE p.name LIKE '%Pizza%'
          AND EXTRACT(YEAR FROM o.orderdate)::INT = ANY($1)
        GROUP BY p.category, order_year
        ORDER BY order_year, total_orders DESC, pizza_category"#,
    )
    .bind(reports.years.as_slice())
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(PizzaOrdersResponse { pizza_orders_by_category }))
}

// GET /revenues_by_pizza_type
#[instrument(skip_all)]
pub async fn revenues_by_pizza_type(
    State(AppState { db_pool, reports }): State<AppState>,
) -> Result<Json<RevenuesByPizzaTypeResponse>, AppError> {
    let revenues_by_pizza_type = sqlx::query_as::<_, PizzaTypeRevenue>(
        r#"SELECT p.name AS pizza_name,
                EXTRACT(YEAR FROM o.orderdate)::INT AS order_year,
                COALESCE(SUM(p.price), 0)::FLOAT8 AS total_revenue
        FROM orderitems oi
        JOIN products p ON oi.sku = p.sku
        JOIN orders o ON oi.orderid = o.orderid
        WHERE EXTRACT(YEAR FROM o.orderdate)::INT = ANY($1)
        GROUP BY p.name, order_year
        ORDER BY order_year, total_revenue DESC, pizza_name"#,
    )
    .bind(reports.years.as_slice())
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(RevenuesByPizzaTypeResponse { revenues_by_pizza_type }))
}

// GET /scatter_plot_pizzen - units vs. revenue per pizza and size
#[instrument(skip_all)]
pub async fn scatter_plot_pizzen(
    State(AppState { db_pool, .. }): State<AppState>,
) -> Result<Json<Vec<PizzaSales>>, AppError> {
    let sales = sqlx::query_as::<_, PizzaSales>(
        r#"SELECT p.name AS pizza_name,
                p.size AS pizza_size,
                COUNT(*)::INT8 AS total_sold,
                COALESCE(SUM(p.price), 0)::FLOAT8 AS total_revenue
        FROM orderitems oi
        JOIN products p ON oi.sku = p.sku
        GROUP BY p.name, p.size
        ORDER BY p.name, p.size"#,
    )
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(sales))
}
