/// Profile handlers - author pages and the follow/unfollow actions
use crate::error::Result;
use crate::middleware::UserId;
use crate::models::{PostSummary, User};
use crate::pagination::{Page, PageQuery};
use crate::services::{FeedService, FollowService, UserService};
use actix_web::http::header;
use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::PgPool;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub author: User,
    pub posts: Page<PostSummary>,
    /// Whether the requesting user currently follows this author
    pub following: bool,
}

/// An author's profile: their posts newest-first plus the follow state
pub async fn profile(
    pool: web::Data<PgPool>,
    username: web::Path<String>,
    user_id: UserId,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let users = UserService::new((**pool).clone());
    let author = users.get_by_username(&username).await?;

    let feeds = FeedService::new((**pool).clone());
    let posts = feeds.profile(author.id, query.page.as_deref()).await?;

    let follows = FollowService::new((**pool).clone());
    let following = follows.is_following(user_id.0, author.id).await?;

    Ok(HttpResponse::Ok().json(ProfileResponse {
        author,
        posts,
        following,
    }))
}

fn redirect_to_profile(username: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, format!("/profiles/{}", username)))
        .finish()
}

/// Follow an author, then send the client back to the profile page.
/// Following an already-followed author changes nothing.
pub async fn follow_author(
    pool: web::Data<PgPool>,
    username: web::Path<String>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let users = UserService::new((**pool).clone());
    let author = users.get_by_username(&username).await?;

    let follows = FollowService::new((**pool).clone());
    follows.follow(user_id.0, author.id).await?;

    Ok(redirect_to_profile(&username))
}

/// Unfollow an author; unfollowing a non-followed author is a no-op.
pub async fn unfollow_author(
    pool: web::Data<PgPool>,
    username: web::Path<String>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let users = UserService::new((**pool).clone());
    let author = users.get_by_username(&username).await?;

    let follows = FollowService::new((**pool).clone());
    follows.unfollow(user_id.0, author.id).await?;

    Ok(redirect_to_profile(&username))
}
