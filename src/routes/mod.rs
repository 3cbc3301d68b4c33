pub mod customers;
pub mod metrics;
pub mod products;
pub mod revenue;
pub mod stores;

use axum::{middleware, Router};
use crate::middleware::cache::{cache_response, ResponseCache};
use crate::state::AppState;

pub fn create_router(cache: ResponseCache) -> Router<AppState> {
    let reports = Router::new()
        .merge(stores::routes())
        .merge(revenue::routes())
        .merge(products::routes())
        .merge(customers::routes())
        .route_layer(middleware::from_fn_with_state(cache, cache_response));

    reports.merge(metrics::routes())
}
