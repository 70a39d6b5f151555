/// Post service - creation, retrieval, editing, and deletion
use crate::db::{comment_repo, group_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::{CommentView, Post, PostSummary};
use crate::pagination::{self, Page};
use sqlx::PgPool;
use uuid::Uuid;

pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a post authored by the authenticated identity
    pub async fn create_post(
        &self,
        author_id: Uuid,
        text: &str,
        group_id: Option<Uuid>,
        image: Option<&str>,
    ) -> Result<Post> {
        self.check_group(group_id).await?;

        let post = post_repo::create_post(&self.pool, author_id, text, group_id, image).await?;
        Ok(post)
    }

    /// Edit a post on the web surface.
    ///
    /// A missing post and a post owned by someone else are deliberately
    /// indistinguishable: both surface as not-found, so the route never
    /// reveals whether there is something a different caller could edit.
    pub async fn edit_post(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        text: &str,
        group_id: Option<Uuid>,
        image: Option<&str>,
    ) -> Result<Post> {
        self.check_group(group_id).await?;

        post_repo::update_post_by_author(&self.pool, post_id, author_id, text, group_id, image)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {post_id} not found")))
    }

    /// Update a post through the REST API.
    ///
    /// Unlike the web surface, the API tells a non-author why the request
    /// failed.
    pub async fn api_update_post(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        text: &str,
        group_id: Option<Uuid>,
        image: Option<&str>,
    ) -> Result<Post> {
        let post = post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {post_id} not found")))?;

        if post.author_id != author_id {
            return Err(AppError::Forbidden(
                "Only the author may change this post".to_string(),
            ));
        }

        self.check_group(group_id).await?;

        post_repo::update_post_by_author(&self.pool, post_id, author_id, text, group_id, image)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {post_id} not found")))
    }

    /// Delete a post through the REST API, author-gated like updates
    pub async fn api_delete_post(&self, post_id: Uuid, author_id: Uuid) -> Result<()> {
        let post = post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {post_id} not found")))?;

        if post.author_id != author_id {
            return Err(AppError::Forbidden(
                "Only the author may delete this post".to_string(),
            ));
        }

        post_repo::delete_post_by_author(&self.pool, post_id, author_id).await?;
        Ok(())
    }

    /// Get a post by ID
    pub async fn get_post(&self, post_id: Uuid) -> Result<Option<Post>> {
        Ok(post_repo::find_post_by_id(&self.pool, post_id).await?)
    }

    /// Post detail: the post joined with author/group, plus its comments
    /// newest-first
    pub async fn get_detail(&self, post_id: Uuid) -> Result<(PostSummary, Vec<CommentView>)> {
        let post = post_repo::find_post_summary(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {post_id} not found")))?;

        let comments = comment_repo::list_by_post(&self.pool, post_id).await?;
        Ok((post, comments))
    }

    /// One page of all posts as bare rows, newest-first (REST list)
    pub async fn list_api_page(&self, raw_page: Option<&str>) -> Result<Page<Post>> {
        let total = post_repo::count_all(&self.pool).await?;
        let spec = pagination::resolve(raw_page, total);
        let items = post_repo::list_rows(&self.pool, spec.limit, spec.offset).await?;
        Ok(Page::new(items, spec, total))
    }

    /// A post may only join a group that exists.
    async fn check_group(&self, group_id: Option<Uuid>) -> Result<()> {
        if let Some(group_id) = group_id {
            if group_repo::find_by_id(&self.pool, group_id).await?.is_none() {
                return Err(AppError::BadRequest(format!("Unknown group {group_id}")));
            }
        }
        Ok(())
    }
}
