//! Shared harness for the database-backed report tests.
//!
//! Each test gets its own throwaway schema loaded with `fixtures/schema.sql`
//! and `fixtures/seed.sql`, so tests can run in parallel against one database.
//!
//! Run with: `TEST_DATABASE_URL=postgres://... cargo test -- --ignored`

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::body::Body;
use axum::http::StatusCode;
use axum::Router;
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Executor;
use tower::ServiceExt;

use pizza_analytics::config::ReportSettings;
use pizza_analytics::middleware::cache::ResponseCache;
use pizza_analytics::state::AppState;

static SCHEMA_COUNTER: AtomicUsize = AtomicUsize::new(0);

pub struct TestDb {
    pub pool: PgPool,
    schema: String,
}

impl TestDb {
    pub async fn seeded() -> Self {
        let url = std::env::var("TEST_DATABASE_URL")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .expect("TEST_DATABASE_URL must be set for database tests");

        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before epoch")
            .subsec_nanos();
        let schema = format!(
            "pizza_test_{}_{}_{}",
            std::process::id(),
            nanos,
            SCHEMA_COUNTER.fetch_add(1, Ordering::SeqCst)
        );

        let search_path = format!("SET search_path TO {schema}");
        let pool = PgPoolOptions::new()
            .max_connections(4)
            .acquire_timeout(Duration::from_secs(10))
            .after_connect(move |conn, _meta| {
                let search_path = search_path.clone();
                Box::pin(async move {
                    conn.execute(search_path.as_str()).await?;
                    Ok(())
                })
            })
            .connect(&url)
            .await
            .expect("Failed to connect to test database");

        pool.execute(format!("CREATE SCHEMA {schema}").as_str())
            .await
            .expect("Failed to create test schema");
        sqlx::raw_sql(include_str!("../fixtures/schema.sql"))
            .execute(&pool)
            .await
            .expect("Failed to create tables");
        sqlx::raw_sql(include_str!("../fixtures/seed.sql"))
            .execute(&pool)
            .await
            .expect("Failed to seed fixture data");

        Self { pool, schema }
    }

    pub fn app(&self) -> Router {
        pizza_analytics::app(
            AppState::new(self.pool.clone(), ReportSettings::default()),
            ResponseCache::new(Duration::from_secs(60), 100),
        )
    }

    pub async fn cleanup(self) {
        let _ = self
            .pool
            .execute(format!("DROP SCHEMA {} CASCADE", self.schema).as_str())
            .await;
        self.pool.close().await;
    }
}

/// GET `uri` and decode the JSON body.
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
        .expect("router is infallible");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    let json = serde_json::from_slice(&bytes).expect("JSON body");
    (status, json)
}
