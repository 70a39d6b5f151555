/// Feed assembly - ordered, paginated slices of posts
///
/// Four views share one contract: newest-first ordering, ten items per
/// page, out-of-range page numbers clamped to the last page.
use crate::db::post_repo;
use crate::error::Result;
use crate::models::PostSummary;
use crate::pagination::{self, Page};
use sqlx::PgPool;
use uuid::Uuid;

pub struct FeedService {
    pool: PgPool,
}

impl FeedService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All posts
    pub async fn global(&self, raw_page: Option<&str>) -> Result<Page<PostSummary>> {
        let total = post_repo::count_all(&self.pool).await?;
        let spec = pagination::resolve(raw_page, total);
        let items = post_repo::list_page(&self.pool, spec.limit, spec.offset).await?;
        Ok(Page::new(items, spec, total))
    }

    /// Posts in one group
    pub async fn group(&self, group_id: Uuid, raw_page: Option<&str>) -> Result<Page<PostSummary>> {
        let total = post_repo::count_by_group(&self.pool, group_id).await?;
        let spec = pagination::resolve(raw_page, total);
        let items =
            post_repo::list_by_group(&self.pool, group_id, spec.limit, spec.offset).await?;
        Ok(Page::new(items, spec, total))
    }

    /// Posts by one author
    pub async fn profile(
        &self,
        author_id: Uuid,
        raw_page: Option<&str>,
    ) -> Result<Page<PostSummary>> {
        let total = post_repo::count_by_author(&self.pool, author_id).await?;
        let spec = pagination::resolve(raw_page, total);
        let items =
            post_repo::list_by_author(&self.pool, author_id, spec.limit, spec.offset).await?;
        Ok(Page::new(items, spec, total))
    }

    /// Posts whose authors the given user follows
    pub async fn following(
        &self,
        follower_id: Uuid,
        raw_page: Option<&str>,
    ) -> Result<Page<PostSummary>> {
        let total = post_repo::count_followed(&self.pool, follower_id).await?;
        let spec = pagination::resolve(raw_page, total);
        let items =
            post_repo::list_followed(&self.pool, follower_id, spec.limit, spec.offset).await?;
        Ok(Page::new(items, spec, total))
    }
}
