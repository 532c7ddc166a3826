//! Database connection pool management

mod postgres;
mod schema;

pub use postgres::{create_pool, create_pool_from_env, DatabaseConfig};
pub use schema::ensure_schema;

// Re-export PgPool for convenience
pub use sqlx::postgres::PgPool;
