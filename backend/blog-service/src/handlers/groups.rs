/// Group handlers - group listing and per-group feeds
use crate::error::Result;
use crate::models::{Group, PostSummary};
use crate::pagination::{Page, PageQuery};
use crate::services::{FeedService, GroupService};
use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::PgPool;

#[derive(Debug, Serialize)]
pub struct GroupFeedResponse {
    pub group: Group,
    pub posts: Page<PostSummary>,
}

/// All groups, ordered by title, paginated like every other listing
pub async fn list_groups(
    pool: web::Data<PgPool>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let service = GroupService::new((**pool).clone());
    let page = service.list(query.page.as_deref()).await?;

    Ok(HttpResponse::Ok().json(page))
}

/// Posts of one group, newest-first; unknown slugs are not-found
pub async fn group_feed(
    pool: web::Data<PgPool>,
    slug: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let groups = GroupService::new((**pool).clone());
    let group = groups.get_by_slug(&slug).await?;

    let feeds = FeedService::new((**pool).clone());
    let posts = feeds.group(group.id, query.page.as_deref()).await?;

    Ok(HttpResponse::Ok().json(GroupFeedResponse { group, posts }))
}
