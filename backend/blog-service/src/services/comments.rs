/// Comment service - replies attached to posts
use crate::db::{comment_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::Comment;
use sqlx::PgPool;
use uuid::Uuid;

pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attach a comment to an existing post.
    ///
    /// The author is the authenticated identity; the creation timestamp is
    /// assigned by the database and never changes.
    pub async fn add_comment(&self, post_id: Uuid, author_id: Uuid, text: &str) -> Result<Comment> {
        if post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(format!("Post {post_id} not found")));
        }

        let comment = comment_repo::create_comment(&self.pool, post_id, author_id, text).await?;
        Ok(comment)
    }
}
