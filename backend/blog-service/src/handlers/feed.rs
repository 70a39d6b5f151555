/// Feed handlers - the global feed and the per-follower feed
use crate::cache::FeedPageCache;
use crate::error::Result;
use crate::middleware::UserId;
use crate::pagination::PageQuery;
use crate::services::FeedService;
use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use std::sync::Arc;

/// Global feed: all posts, newest-first, publicly readable.
///
/// The rendered page body is served read-through from the cache; a hit
/// returns the stored bytes verbatim, so the page may lag post writes by
/// up to the cache TTL. Cache trouble degrades to a database read.
pub async fn global_feed(
    pool: web::Data<PgPool>,
    cache: web::Data<Arc<FeedPageCache>>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let page_number = query.requested();

    match cache.get_global_page(page_number).await {
        Ok(Some(body)) => {
            return Ok(HttpResponse::Ok()
                .content_type(ContentType::json())
                .body(body))
        }
        Ok(None) => {}
        Err(err) => tracing::warn!("global feed cache read failed: {}", err),
    }

    let service = FeedService::new((**pool).clone());
    let page = service.global(query.page.as_deref()).await?;
    let body = serde_json::to_string(&page)?;

    if let Err(err) = cache.put_global_page(page_number, &body).await {
        tracing::debug!("global feed cache write failed: {}", err);
    }

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body))
}

/// Posts of the authors the requesting user follows
pub async fn following_feed(
    pool: web::Data<PgPool>,
    user_id: UserId,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let service = FeedService::new((**pool).clone());
    let page = service.following(user_id.0, query.page.as_deref()).await?;

    Ok(HttpResponse::Ok().json(page))
}
