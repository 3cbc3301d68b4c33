use axum::{routing::get, Router};
use crate::handlers::store;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/store_ids", get(store::store_ids))
        .route("/stores", get(store::list_stores))
        .route("/stores/{store_id}", get(store::get_store))
        .route("/top_stores", get(store::top_stores))
        .route("/top_5_stores", get(store::top_5_stores))
        .route("/worst_5_stores", get(store::worst_5_stores))
        .route("/store_locations", get(store::store_locations))
        .route("/store_yearly_avg_orders", get(store::store_yearly_avg_orders))
}
