pub mod models;
pub mod repository;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub use repository::StoreError;

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Creates both tables if they are missing. Handlers repeat the same
/// idempotent statements inside their own transactions, so this is only a
/// startup convenience.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    let mut tx = pool.begin().await?;
    repository::create_temperatures_table(&mut tx).await?;
    tx.commit().await?;
    Ok(())
}
