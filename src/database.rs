// src/database.rs
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, warn};

use crate::config::Config;

/// Lookup indexes the report queries lean on. Created idempotently at startup.
const INDEX_STATEMENTS: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_orders_orderdate ON orders(orderdate)",
    "CREATE INDEX IF NOT EXISTS idx_orders_storeid ON orders(storeid)",
    "CREATE INDEX IF NOT EXISTS idx_orders_customerid ON orders(customerid)",
    "CREATE INDEX IF NOT EXISTS idx_stores_storeid ON stores(storeid)",
    "CREATE INDEX IF NOT EXISTS idx_stores_latitude ON stores(latitude)",
    "CREATE INDEX IF NOT EXISTS idx_stores_longitude ON stores(longitude)",
    "CREATE INDEX IF NOT EXISTS idx_customers_customerid ON customers(customerid)",
    "CREATE INDEX IF NOT EXISTS idx_customers_latitude ON customers(latitude)",
    "CREATE INDEX IF NOT EXISTS idx_customers_longitude ON customers(longitude)",
    "CREATE INDEX IF NOT EXISTS idx_products_sku ON products(sku)",
    "CREATE INDEX IF NOT EXISTS idx_orderitems_orderid ON orderitems(orderid)",
    "CREATE INDEX IF NOT EXISTS idx_orderitems_sku ON orderitems(sku)",
];

pub async fn create_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.database_url)
        .await
}

/// Create the report indexes. A failing statement is logged and skipped so a
/// read-only database role can still serve reports.
pub async fn ensure_indexes(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut created = 0usize;
    for statement in INDEX_STATEMENTS {
        match sqlx::query(statement).execute(pool).await {
            Ok(_) => created += 1,
            Err(sqlx::Error::Database(db_err)) => {
                warn!(statement, error = %db_err, "Skipping index");
            }
            Err(e) => return Err(e),
        }
    }
    info!(created, total = INDEX_STATEMENTS.len(), "Report indexes ensured");
    Ok(())
}
