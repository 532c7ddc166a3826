//! # potd-db
//!
//! Storage layer implementing the store traits from `potd-core`.
//!
//! ## Overview
//!
//! - Connection pool management and schema bootstrap
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - PostgreSQL store implementations
//! - In-memory store implementations (development and tests)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use potd_db::{create_pool, ensure_schema, DatabaseConfig, PgReactionLogStore};
//! use potd_core::ReactionLogStore;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     ensure_schema(&pool).await?;
//!     let log = PgReactionLogStore::new(pool);
//!
//!     // Use the store...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{InMemoryReactionLogStore, InMemoryStatsStore};
pub use pool::{create_pool, create_pool_from_env, ensure_schema, DatabaseConfig, PgPool};
pub use repositories::{PgReactionLogStore, PgStatsStore};
