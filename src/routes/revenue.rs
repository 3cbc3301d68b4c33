use axum::{routing::get, Router};
use crate::handlers::revenue::{
    revenue_per_weekday, scatterplot, store_annual_revenues, store_monthly_revenues,
    store_orders_per_hour,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/store_annual_revenues", get(store_annual_revenues))
        .route("/store_monthly_revenues", get(store_monthly_revenues))
        .route("/revenue_per_weekday", get(revenue_per_weekday))
        .route("/store_orders_per_hour", get(store_orders_per_hour))
        .route("/scatterplot", get(scatterplot))
}
