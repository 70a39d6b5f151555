/// Feed page caching
///
/// Redis-backed cache for the rendered global feed, the hottest read path.
/// Entries are keyed by page number and expire by TTL only - post writes do
/// not invalidate them, so a cached page may briefly report posts that no
/// longer exist. `clear_global` is the explicit administrative escape hatch.
use redis::{aio::ConnectionManager, AsyncCommands};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{AppError, Result};

const GLOBAL_FEED_PREFIX: &str = "feed:global:v1:page:";

/// Cache manager for rendered feed pages
#[derive(Clone)]
pub struct FeedPageCache {
    redis: ConnectionManager,
    default_ttl: Duration,
}

impl FeedPageCache {
    pub fn new(redis: ConnectionManager, default_ttl_secs: u64) -> Self {
        Self {
            redis,
            default_ttl: Duration::from_secs(default_ttl_secs),
        }
    }

    /// Cache key for one page of the global feed.
    ///
    /// The page number is part of the key so page 2 can never be served a
    /// cached page 1.
    fn global_page_key(page: u32) -> String {
        format!("{GLOBAL_FEED_PREFIX}{page}")
    }

    /// Read a cached rendered page; `None` on miss
    pub async fn get_global_page(&self, page: u32) -> Result<Option<String>> {
        let key = Self::global_page_key(page);
        let mut conn = self.redis.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(body)) => {
                debug!("Global feed cache HIT for page {}", page);
                Ok(Some(body))
            }
            Ok(None) => {
                debug!("Global feed cache MISS for page {}", page);
                Ok(None)
            }
            Err(e) => {
                warn!("Redis read error for global feed cache: {}", e);
                Err(AppError::CacheError(e.to_string()))
            }
        }
    }

    /// Store a rendered page verbatim with the default TTL (plus jitter)
    pub async fn put_global_page(&self, page: u32, body: &str) -> Result<()> {
        let key = Self::global_page_key(page);
        let ttl = jittered(self.default_ttl);

        let mut conn = self.redis.clone();
        conn.set_ex::<_, _, ()>(&key, body, ttl.as_secs())
            .await
            .map_err(|e| {
                warn!("Failed to write global feed cache: {}", e);
                AppError::CacheError(e.to_string())
            })?;

        debug!(
            "Global feed cache WRITE for page {} with TTL {:?}",
            page, ttl
        );

        Ok(())
    }

    /// Drop every cached global feed page; returns how many entries went away
    pub async fn clear_global(&self) -> Result<u64> {
        let pattern = format!("{GLOBAL_FEED_PREFIX}*");

        let mut scan_conn = self.redis.clone();
        let mut keys: Vec<String> = Vec::new();
        {
            let mut iter = scan_conn
                .scan_match::<_, String>(&pattern)
                .await
                .map_err(|e| AppError::CacheError(e.to_string()))?;
            while let Some(key) = iter.next_item().await {
                keys.push(key);
            }
        }

        if keys.is_empty() {
            debug!("Global feed cache CLEAR found nothing to remove");
            return Ok(0);
        }

        let removed = keys.len() as u64;
        let mut conn = self.redis.clone();
        conn.del::<_, ()>(keys)
            .await
            .map_err(|e| AppError::CacheError(e.to_string()))?;

        debug!("Global feed cache CLEAR removed {} pages", removed);

        Ok(removed)
    }
}

/// Spread expirations out a little so pages do not all fall out at once
fn jittered(ttl: Duration) -> Duration {
    let jitter = (rand::random::<u32>() % 10) as f64 / 100.0;
    let jitter_secs = (ttl.as_secs_f64() * jitter).round() as u64;
    ttl + Duration::from_secs(jitter_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_key_varies_with_page_number() {
        assert_eq!(
            FeedPageCache::global_page_key(1),
            "feed:global:v1:page:1".to_string()
        );
        assert_ne!(
            FeedPageCache::global_page_key(1),
            FeedPageCache::global_page_key(2)
        );
    }

    #[test]
    fn jitter_only_ever_extends_the_ttl() {
        let base = Duration::from_secs(30);
        for _ in 0..100 {
            let ttl = jittered(base);
            assert!(ttl >= base);
            assert!(ttl <= base + Duration::from_secs(3));
        }
    }
}
