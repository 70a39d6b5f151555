/// User service - read-only access to platform identities
///
/// Accounts are created and managed by the external identity service;
/// this service only reads them.
use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::models::User;
use crate::pagination::{self, Page};
use sqlx::PgPool;
use uuid::Uuid;

pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// One page of all users, ordered by username
    pub async fn list(&self, raw_page: Option<&str>) -> Result<Page<User>> {
        let total = user_repo::count_all(&self.pool).await?;
        let spec = pagination::resolve(raw_page, total);
        let items = user_repo::list_page(&self.pool, spec.limit, spec.offset).await?;
        Ok(Page::new(items, spec, total))
    }

    /// Resolve a user by ID, or not-found
    pub async fn get(&self, user_id: Uuid) -> Result<User> {
        user_repo::find_by_id(&self.pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))
    }

    /// Resolve a user by username, or not-found
    pub async fn get_by_username(&self, username: &str) -> Result<User> {
        user_repo::find_by_username(&self.pool, username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{username}' not found")))
    }
}
