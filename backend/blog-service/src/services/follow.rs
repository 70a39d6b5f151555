/// Follow service - the directed subscription edge set
use crate::db::follow_repo;
use crate::error::{AppError, Result};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct FollowService {
    pool: PgPool,
}

impl FollowService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Idempotent follow; returns true if a new edge was created.
    ///
    /// Self-referential edges never reach storage.
    pub async fn follow(&self, follower_id: Uuid, author_id: Uuid) -> Result<bool> {
        if follower_id == author_id {
            return Err(AppError::BadRequest(
                "You cannot follow yourself".to_string(),
            ));
        }

        let inserted = follow_repo::insert_follow(&self.pool, follower_id, author_id).await?;
        Ok(inserted.is_some())
    }

    /// Idempotent unfollow; unfollowing a non-followed author is a no-op.
    pub async fn unfollow(&self, follower_id: Uuid, author_id: Uuid) -> Result<bool> {
        let removed = follow_repo::delete_follow(&self.pool, follower_id, author_id).await?;
        Ok(removed)
    }

    /// Whether follower currently follows author
    pub async fn is_following(&self, follower_id: Uuid, author_id: Uuid) -> Result<bool> {
        Ok(follow_repo::is_following(&self.pool, follower_id, author_id).await?)
    }
}
