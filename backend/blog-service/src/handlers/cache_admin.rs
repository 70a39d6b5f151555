/// Administrative cache operations
use crate::cache::FeedPageCache;
use crate::error::Result;
use actix_web::{web, HttpResponse};
use std::sync::Arc;

/// Drop every cached global feed page immediately.
///
/// The cache otherwise expires purely by TTL; this is the escape hatch for
/// operators (and tests) who need the next read to see fresh data.
pub async fn clear_feed_cache(cache: web::Data<Arc<FeedPageCache>>) -> Result<HttpResponse> {
    let cleared = cache.clear_global().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "cleared": cleared })))
}
