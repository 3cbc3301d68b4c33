// src/state.rs
use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ReportSettings;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub reports: Arc<ReportSettings>,
}

impl AppState {
    pub fn new(db_pool: PgPool, reports: ReportSettings) -> Self {
        Self {
            db_pool,
            reports: Arc::new(reports),
        }
    }
}
