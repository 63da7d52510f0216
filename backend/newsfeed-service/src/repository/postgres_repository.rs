use sqlx::PgPool;
use tracing::debug;

use super::r#trait::{ContentRepository, FollowGraphRepository, RepositoryResult};
use crate::domain::{AccountId, ContentEntry, FollowEdge};

/// PostgreSQL-backed follow graph (`user_follows` table)
#[derive(Clone)]
pub struct PostgresFollowGraphRepository {
    pool: PgPool,
}

impl PostgresFollowGraphRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FollowGraphRepository for PostgresFollowGraphRepository {
    async fn edges_from(&self, follower_id: AccountId) -> RepositoryResult<Vec<FollowEdge>> {
        let edges = sqlx::query_as::<_, FollowEdge>(
            r#"
            SELECT follower_id, followed_id
            FROM user_follows
            WHERE follower_id = $1
            ORDER BY followed_id
            "#,
        )
        .bind(follower_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(follower = %follower_id, edges = edges.len(), "Loaded follow edges");
        Ok(edges)
    }

    async fn health_check(&self) -> RepositoryResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// PostgreSQL-backed content store (`photos` table)
#[derive(Clone)]
pub struct PostgresContentRepository {
    pool: PgPool,
}

impl PostgresContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ContentRepository for PostgresContentRepository {
    async fn top_k_by_owners(
        &self,
        owner_ids: &[AccountId],
        k: i64,
    ) -> RepositoryResult<Vec<ContentEntry>> {
        if owner_ids.is_empty() || k <= 0 {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = owner_ids.iter().map(|id| id.get()).collect();

        // Ties on created_at fall back to the primary key, newest row first.
        let entries = sqlx::query_as::<_, ContentEntry>(
            r#"
            SELECT id, owner_id, storage_locator,
                   user_latitude, user_longitude, photo_latitude, photo_longitude,
                   created_at
            FROM photos
            WHERE owner_id = ANY($1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(&ids)
        .bind(k)
        .fetch_all(&self.pool)
        .await?;

        debug!(
            owners = ids.len(),
            limit = k,
            entries = entries.len(),
            "Loaded recent content"
        );
        Ok(entries)
    }

    async fn health_check(&self) -> RepositoryResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
