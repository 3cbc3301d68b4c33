// src/dtos/product.rs
use serde::Serialize;
use sqlx::FromRow;

use crate::models::product::Product;

#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct CategoryOrders {
    pub pizza_category: Option<String>,
    pub order_year: i32,
    pub total_orders: i64,
}

#[derive(Debug, Serialize)]
pub struct PizzaOrdersResponse {
    pub pizza_orders_by_category: Vec<CategoryOrders>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct PizzaTypeRevenue {
    pub pizza_name: String,
    pub order_year: i32,
    pub total_revenue: f64,
}

#[derive(Debug, Serialize)]
pub struct RevenuesByPizzaTypeResponse {
    pub revenues_by_pizza_type: Vec<PizzaTypeRevenue>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct PizzaSales {
    pub pizza_name: String,
    pub pizza_size: Option<String>,
    pub total_sold: i64,
    pub total_revenue: f64,
}
