//! PostgreSQL implementation of StatsStore

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use potd_core::entities::StatsRecord;
use potd_core::traits::{RepoResult, StatsStore};
use potd_core::value_objects::{ItemKey, TimeWindow};

use crate::mappers::StatsUpsert;
use crate::models::{ItemKeyModel, ItemStatsModel};

use super::error::map_db_error;

/// PostgreSQL implementation of StatsStore
#[derive(Clone)]
pub struct PgStatsStore {
    pool: PgPool,
}

impl PgStatsStore {
    /// Create a new PgStatsStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsStore for PgStatsStore {
    #[instrument(skip(self, record), fields(key = %record.item_key(), total = record.total))]
    async fn upsert(&self, record: &StatsRecord) -> RepoResult<()> {
        let row = StatsUpsert::new(record);

        sqlx::query(
            r#"
            INSERT INTO item_stats
                (subject_id, item_id, breakdown, total, first_reaction_at, last_reaction_at, synced_at)
            VALUES ($1, $2, $3, $4, $5, $6, now())
            ON CONFLICT (subject_id, item_id)
            DO UPDATE SET breakdown = EXCLUDED.breakdown,
                          total = EXCLUDED.total,
                          first_reaction_at = EXCLUDED.first_reaction_at,
                          last_reaction_at = EXCLUDED.last_reaction_at,
                          synced_at = now()
            "#,
        )
        .bind(row.subject_id)
        .bind(row.item_id)
        .bind(row.breakdown)
        .bind(row.total)
        .bind(record.first_reaction_at)
        .bind(record.last_reaction_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &ItemKey) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM item_stats WHERE subject_id = $1 AND item_id = $2
            "#,
        )
        .bind(&key.subject_id)
        .bind(key.item_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn get(&self, key: &ItemKey) -> RepoResult<Option<StatsRecord>> {
        let result = sqlx::query_as::<_, ItemStatsModel>(
            r#"
            SELECT subject_id, item_id, breakdown, total, first_reaction_at, last_reaction_at
            FROM item_stats
            WHERE subject_id = $1 AND item_id = $2
            "#,
        )
        .bind(&key.subject_id)
        .bind(key.item_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(StatsRecord::from))
    }

    #[instrument(skip(self))]
    async fn find_best_in_window(&self, window: &TimeWindow) -> RepoResult<Option<StatsRecord>> {
        let result = sqlx::query_as::<_, ItemStatsModel>(
            r#"
            SELECT subject_id, item_id, breakdown, total, first_reaction_at, last_reaction_at
            FROM item_stats
            WHERE last_reaction_at >= $1 AND last_reaction_at < $2 AND total > 0
            ORDER BY total DESC, subject_id COLLATE "C" ASC, item_id ASC
            LIMIT 1
            "#,
        )
        .bind(window.start())
        .bind(window.end())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(StatsRecord::from))
    }

    #[instrument(skip(self))]
    async fn list_keys(&self) -> RepoResult<Vec<ItemKey>> {
        let results = sqlx::query_as::<_, ItemKeyModel>(
            r#"
            SELECT subject_id, item_id FROM item_stats
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ItemKey::from).collect())
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1 FROM item_stats LIMIT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
