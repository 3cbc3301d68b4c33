//! Read-only analytics API for the pizza-chain dashboards.
//!
//! Every endpoint answers one business question (top stores per year, revenue
//! per weekday, RFM segments, ...) with an aggregation over the `stores`,
//! `customers`, `products`, `orders` and `orderitems` tables.

pub mod analytics;
pub mod config;
pub mod database;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

use axum::{http::Method, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::middleware::cache::ResponseCache;
use crate::state::AppState;

/// Full application: every report nested under `/api`, plus CORS and request tracing.
pub fn app(app_state: AppState, cache: ResponseCache) -> Router {
    let api = routes::create_router(cache)
        .route("/", get(|| async { "Pizza Analytics API" }))
        .route("/health", get(health_check));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .nest("/api", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn health_check() -> &'static str {
    "OK"
}
