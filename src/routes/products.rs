use axum::{routing::get, Router};
use crate::handlers::product::{
    list_products, pizza_orders, revenues_by_pizza_type, scatter_plot_pizzen,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/pizza_orders", get(pizza_orders))
        .route("/revenues_by_pizza_type", get(revenues_by_pizza_type))
        .route("/scatter_plot_pizzen", get(scatter_plot_pizzen))
}
