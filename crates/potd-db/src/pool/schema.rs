//! Schema bootstrap for the reaction log and stats tables

use sqlx::PgPool;
use tracing::info;

const SCHEMA: &str = include_str!("../../migrations/0001_reaction_stats.sql");

/// Create the `reaction_events` and `item_stats` tables if they do not exist
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    info!("Database schema ready");
    Ok(())
}
