/// Group service - named categories posts may belong to
use crate::db::group_repo;
use crate::error::{AppError, Result};
use crate::models::Group;
use crate::pagination::{self, Page};
use sqlx::PgPool;
use uuid::Uuid;

pub struct GroupService {
    pool: PgPool,
}

impl GroupService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// One page of all groups, ordered by title ascending
    pub async fn list(&self, raw_page: Option<&str>) -> Result<Page<Group>> {
        let total = group_repo::count_all(&self.pool).await?;
        let spec = pagination::resolve(raw_page, total);
        let items = group_repo::list_page(&self.pool, spec.limit, spec.offset).await?;
        Ok(Page::new(items, spec, total))
    }

    /// Resolve a group by slug, or not-found
    pub async fn get_by_slug(&self, slug: &str) -> Result<Group> {
        group_repo::find_by_slug(&self.pool, slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Group '{slug}' not found")))
    }

    /// Create a group
    pub async fn create(&self, title: &str, slug: &str, description: &str) -> Result<Group> {
        let group = group_repo::create_group(&self.pool, title, slug, description).await?;
        Ok(group)
    }

    /// Delete a group.
    ///
    /// Its posts survive with their group reference nulled out by the
    /// schema's ON DELETE SET NULL.
    pub async fn delete(&self, group_id: Uuid) -> Result<()> {
        if !group_repo::delete_group(&self.pool, group_id).await? {
            return Err(AppError::NotFound(format!("Group {group_id} not found")));
        }
        Ok(())
    }
}
