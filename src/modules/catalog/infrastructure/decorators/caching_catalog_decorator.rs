use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::modules::catalog::domain::{
    entities::{CatalogDetail, CatalogSummary},
    repositories::CatalogRepository,
};
use crate::shared::domain::{CatalogId, MediaKind};
use crate::shared::errors::AppResult;

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    data: T,
    created_at: Instant,
}

impl<T> CacheEntry<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            created_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Adds a TTL cache in front of any `CatalogRepository`.
///
/// Successful lookups are cached per kind and normalized query (or id);
/// failures and "not found" answers are not, so a retry reaches the catalog.
pub struct CachingCatalogDecorator {
    inner: Arc<dyn CatalogRepository>,
    searches: DashMap<String, CacheEntry<Vec<CatalogSummary>>>,
    details: DashMap<String, CacheEntry<CatalogDetail>>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CachingCatalogDecorator {
    pub fn new(inner: Arc<dyn CatalogRepository>, ttl: Duration) -> Self {
        Self {
            inner,
            searches: DashMap::new(),
            details: DashMap::new(),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn search_key(query: &str, kind: MediaKind) -> String {
        format!("{}:{}", kind, query.trim().to_lowercase())
    }

    fn details_key(id: &CatalogId, kind: MediaKind) -> String {
        format!("{}:{}", kind, id)
    }

    fn lookup<T: Clone>(&self, cache: &DashMap<String, CacheEntry<T>>, key: &str) -> Option<T> {
        let hit = match cache.get(key) {
            Some(entry) if !entry.is_expired(self.ttl) => Some(entry.data.clone()),
            Some(_) => None,
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                return None;
            }
        };

        match hit {
            Some(data) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(data)
            }
            None => {
                cache.remove(key);
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Drops expired entries. Returns how many were removed.
    pub fn evict_expired(&self) -> usize {
        let before = self.searches.len() + self.details.len();
        self.searches.retain(|_, entry| !entry.is_expired(self.ttl));
        self.details.retain(|_, entry| !entry.is_expired(self.ttl));
        before - (self.searches.len() + self.details.len())
    }

    pub fn clear(&self) {
        self.searches.clear();
        self.details.clear();
    }

    pub fn stats(&self) -> CatalogCacheStats {
        CatalogCacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.searches.len() + self.details.len(),
        }
    }
}

#[async_trait]
impl CatalogRepository for CachingCatalogDecorator {
    async fn search(&self, query: &str, kind: MediaKind) -> AppResult<Vec<CatalogSummary>> {
        let key = Self::search_key(query, kind);
        if let Some(cached) = self.lookup(&self.searches, &key) {
            debug!("Cache HIT for search: {}", key);
            return Ok(cached);
        }

        debug!("Cache MISS for search: {}", key);
        let results = self.inner.search(query, kind).await?;
        self.searches.insert(key, CacheEntry::new(results.clone()));
        Ok(results)
    }

    async fn details(&self, id: &CatalogId, kind: MediaKind) -> AppResult<Option<CatalogDetail>> {
        let key = Self::details_key(id, kind);
        if let Some(cached) = self.lookup(&self.details, &key) {
            debug!("Cache HIT for details: {}", key);
            return Ok(Some(cached));
        }

        debug!("Cache MISS for details: {}", key);
        let result = self.inner.details(id, kind).await?;
        if let Some(ref detail) = result {
            self.details.insert(key, CacheEntry::new(detail.clone()));
        }
        Ok(result)
    }
}
