/// REST API handlers for posts
///
/// Reads are public; writes carry the caller's identity and are
/// author-gated. Unlike the web surface, a non-author mutating a post gets
/// a forbidden error instead of a masked not-found.
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::models::Post;
use crate::pagination::PageQuery;
use crate::services::PostService;
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// REST serialization of a post
#[derive(Debug, Serialize)]
pub struct ApiPost {
    pub id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub author: Uuid,
    pub group: Option<Uuid>,
    pub image: Option<String>,
}

impl From<Post> for ApiPost {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            text: post.text,
            created_at: post.created_at,
            author: post.author_id,
            group: post.group_id,
            image: post.image,
        }
    }
}

/// REST input for creating or updating a post.
///
/// Text may be empty here; the author field does not exist on purpose -
/// it always comes from the authenticated identity.
#[derive(Debug, Deserialize)]
pub struct ApiPostInput {
    #[serde(default)]
    pub text: String,
    pub group: Option<Uuid>,
    pub image: Option<String>,
}

/// List all posts, newest-first, paginated
pub async fn api_list_posts(
    pool: web::Data<PgPool>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let page = service.list_api_page(query.page.as_deref()).await?;

    Ok(HttpResponse::Ok().json(page.map(ApiPost::from)))
}

/// Create a post authored by the caller
pub async fn api_create_post(
    pool: web::Data<PgPool>,
    user_id: UserId,
    input: web::Json<ApiPostInput>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let post = service
        .create_post(user_id.0, &input.text, input.group, input.image.as_deref())
        .await?;

    Ok(HttpResponse::Created().json(ApiPost::from(post)))
}

/// Retrieve a single post
pub async fn api_get_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let post = service
        .get_post(*post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {post_id} not found")))?;

    Ok(HttpResponse::Ok().json(ApiPost::from(post)))
}

/// Update a post; only its author may
pub async fn api_update_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user_id: UserId,
    input: web::Json<ApiPostInput>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let post = service
        .api_update_post(
            *post_id,
            user_id.0,
            &input.text,
            input.group,
            input.image.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiPost::from(post)))
}

/// Delete a post; only its author may
pub async fn api_delete_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    service.api_delete_post(*post_id, user_id.0).await?;

    Ok(HttpResponse::NoContent().finish())
}
