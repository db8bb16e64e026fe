//! Time-bounded cache for the encoded `/api/dsn` response
use axum::body::Bytes;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

struct CachedBody {
    body: Bytes,
    stored_at: Instant,
}

pub struct SnapshotCache {
    ttl: Duration,
    entry: RwLock<Option<CachedBody>>,
}

impl SnapshotCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: RwLock::new(None),
        }
    }

    /// The cached body, if one was stored less than `ttl` ago.
    pub async fn fresh(&self) -> Option<Bytes> {
        let entry = self.entry.read().await;
        entry
            .as_ref()
            .filter(|cached| cached.stored_at.elapsed() < self.ttl)
            .map(|cached| cached.body.clone())
    }

    pub async fn store(&self, body: Bytes) {
        *self.entry.write().await = Some(CachedBody {
            body,
            stored_at: Instant::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_cache_misses() {
        let cache = SnapshotCache::new(Duration::from_secs(3600));
        assert!(cache.fresh().await.is_none());
    }

    #[tokio::test]
    async fn test_stored_body_is_served_within_ttl() {
        let cache = SnapshotCache::new(Duration::from_secs(3600));
        cache.store(Bytes::from_static(b"{\"stations\":[]}")).await;
        assert_eq!(cache.fresh().await.unwrap(), Bytes::from_static(b"{\"stations\":[]}"));
    }

    #[tokio::test]
    async fn test_expired_body_is_not_served() {
        let cache = SnapshotCache::new(Duration::ZERO);
        cache.store(Bytes::from_static(b"{}")).await;
        assert!(cache.fresh().await.is_none());
    }

    #[tokio::test]
    async fn test_store_replaces_previous_body() {
        let cache = SnapshotCache::new(Duration::from_secs(3600));
        cache.store(Bytes::from_static(b"old")).await;
        cache.store(Bytes::from_static(b"new")).await;
        assert_eq!(cache.fresh().await.unwrap(), Bytes::from_static(b"new"));
    }
}
