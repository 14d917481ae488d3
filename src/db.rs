//! Database module
//!
//! Database connection and schema checks.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::Config;

/// Open a pool using the configured URL and size
pub async fn connect(database_url: &str, config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(database_url)
        .await
}

/// Simple connectivity check
pub async fn verify_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;

    Ok(())
}

/// Check if required tables exist
/// Note: the schema is created from the raw SQL files in migrations/
pub async fn check_schema(pool: &PgPool) -> Result<bool, sqlx::Error> {
    let required_tables = ["products"];

    for table in required_tables {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM information_schema.tables
                WHERE table_schema = 'public' AND table_name = $1
            )
            "#,
        )
        .bind(table)
        .fetch_one(pool)
        .await?;

        if !exists {
            tracing::error!("Required table '{}' does not exist", table);
            return Ok(false);
        }
    }

    let invalid: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM products WHERE jsonb_typeof(document) <> 'object'",
    )
    .fetch_one(pool)
    .await?;

    if invalid > 0 {
        tracing::warn!("{} product rows are not JSON objects and will be skipped", invalid);
    }

    Ok(true)
}
