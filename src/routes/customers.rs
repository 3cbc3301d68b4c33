use axum::{routing::get, Router};
use crate::handlers::customer::{boxplot_metrics, customer_locations, rfm_segments};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customer_locations", get(customer_locations))
        .route("/rfm_segments", get(rfm_segments))
        .route("/boxplot_metrics", get(boxplot_metrics))
}
