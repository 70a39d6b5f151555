/// REST API handlers for users - read-only
use crate::error::Result;
use crate::pagination::PageQuery;
use crate::services::UserService;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

/// List all users, paginated
pub async fn api_list_users(
    pool: web::Data<PgPool>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let service = UserService::new((**pool).clone());
    let page = service.list(query.page.as_deref()).await?;

    Ok(HttpResponse::Ok().json(page))
}

/// Retrieve a single user
pub async fn api_get_user(
    pool: web::Data<PgPool>,
    user_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = UserService::new((**pool).clone());
    let user = service.get(*user_id).await?;

    Ok(HttpResponse::Ok().json(user))
}
