use axum::{routing::get, Router};
use crate::handlers::metrics::get_metrics;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    // Uncached: the KPI cards should reflect the latest orders.
    Router::new().route("/metrics", get(get_metrics))
}
