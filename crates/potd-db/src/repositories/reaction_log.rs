//! PostgreSQL implementation of ReactionLogStore

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use sqlx::PgPool;
use tracing::instrument;

use potd_core::entities::ReactionEvent;
use potd_core::traits::{EventStream, ReactionLogStore, RepoResult};
use potd_core::value_objects::{ItemKey, ReactionKind};

use crate::models::{ReactionEventModel, UpdatedReactionModel};

use potd_core::error::DomainError;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of ReactionLogStore
#[derive(Clone)]
pub struct PgReactionLogStore {
    pool: PgPool,
}

impl PgReactionLogStore {
    /// Create a new PgReactionLogStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionLogStore for PgReactionLogStore {
    #[instrument(skip(self))]
    async fn find(&self, key: &ItemKey, actor_id: &str) -> RepoResult<Option<ReactionEvent>> {
        let result = sqlx::query_as::<_, ReactionEventModel>(
            r#"
            SELECT subject_id, item_id, actor_id, kind, created_at, updated_at
            FROM reaction_events
            WHERE subject_id = $1 AND item_id = $2 AND actor_id = $3
            "#,
        )
        .bind(&key.subject_id)
        .bind(key.item_id)
        .bind(actor_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ReactionEvent::from))
    }

    #[instrument(skip(self, event), fields(key = %event.item_key(), actor = %event.actor_id))]
    async fn create(&self, event: &ReactionEvent) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO reaction_events (subject_id, item_id, actor_id, kind, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&event.subject_id)
        .bind(event.item_id)
        .bind(&event.actor_id)
        .bind(event.kind.as_str())
        .bind(event.created_at)
        .bind(event.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || DomainError::ReactionAlreadyExists {
                key: event.item_key(),
                actor_id: event.actor_id.clone(),
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self, event), fields(key = %event.item_key(), actor = %event.actor_id))]
    async fn put(&self, event: &ReactionEvent) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO reaction_events (subject_id, item_id, actor_id, kind, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (subject_id, item_id, actor_id)
            DO UPDATE SET kind = EXCLUDED.kind,
                          created_at = EXCLUDED.created_at,
                          updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&event.subject_id)
        .bind(event.item_id)
        .bind(&event.actor_id)
        .bind(event.kind.as_str())
        .bind(event.created_at)
        .bind(event.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, now))]
    async fn update(
        &self,
        key: &ItemKey,
        actor_id: &str,
        kind: &ReactionKind,
        now: DateTime<Utc>,
    ) -> RepoResult<(ReactionKind, ReactionEvent)> {
        // Row lock in the CTE pins the previous kind to the row being updated
        let result = sqlx::query_as::<_, UpdatedReactionModel>(
            r#"
            WITH previous AS (
                SELECT subject_id, item_id, actor_id, kind
                FROM reaction_events
                WHERE subject_id = $1 AND item_id = $2 AND actor_id = $3
                FOR UPDATE
            )
            UPDATE reaction_events AS r
            SET kind = $4, updated_at = $5
            FROM previous
            WHERE r.subject_id = previous.subject_id
              AND r.item_id = previous.item_id
              AND r.actor_id = previous.actor_id
            RETURNING r.subject_id, r.item_id, r.actor_id, r.kind, r.created_at, r.updated_at,
                      previous.kind AS previous_kind
            "#,
        )
        .bind(&key.subject_id)
        .bind(key.item_id)
        .bind(actor_id)
        .bind(kind.as_str())
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        let row = result.ok_or_else(|| DomainError::ReactionNotFound {
            key: key.clone(),
            actor_id: actor_id.to_string(),
        })?;
        Ok((
            ReactionKind::new(row.previous_kind),
            ReactionEvent::from(row.event),
        ))
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &ItemKey, actor_id: &str) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM reaction_events
            WHERE subject_id = $1 AND item_id = $2 AND actor_id = $3
            "#,
        )
        .bind(&key.subject_id)
        .bind(key.item_id)
        .bind(actor_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn list_for_item(&self, key: &ItemKey) -> RepoResult<Vec<ReactionEvent>> {
        let results = sqlx::query_as::<_, ReactionEventModel>(
            r#"
            SELECT subject_id, item_id, actor_id, kind, created_at, updated_at
            FROM reaction_events
            WHERE subject_id = $1 AND item_id = $2
            ORDER BY created_at, actor_id
            "#,
        )
        .bind(&key.subject_id)
        .bind(key.item_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ReactionEvent::from).collect())
    }

    fn list_all(&self) -> EventStream<'_> {
        sqlx::query_as::<_, ReactionEventModel>(
            r#"
            SELECT subject_id, item_id, actor_id, kind, created_at, updated_at
            FROM reaction_events
            ORDER BY subject_id, item_id
            "#,
        )
        .fetch(&self.pool)
        .map(|row| row.map(ReactionEvent::from).map_err(map_db_error))
        .boxed()
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
