//! In-Memory Response Cache
//!
//! 按请求 URI 缓存成功的 GET 响应体，条目在 TTL 到期后失效

use axum::body::Bytes;
use dashmap::DashMap;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::CacheConfig;

/// 缓存的响应
#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub content_type: Option<String>,
    pub body: Bytes,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    response: CachedResponse,
    inserted_at: Instant,
}

/// 缓存统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResponseCacheStats {
    pub total_entries: usize,
    pub hit_count: u64,
    pub miss_count: u64,
}

/// 响应缓存
pub struct ResponseCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
    max_entries: usize,
    hit_count: AtomicU64,
    miss_count: AtomicU64,
    /// 每次 `clear` 加一，用来丢弃清空前就开始生成的响应
    generation: AtomicU64,
}

impl ResponseCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            max_entries,
            hit_count: AtomicU64::new(0),
            miss_count: AtomicU64::new(0),
            generation: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(Duration::from_secs(config.ttl_secs), config.max_entries)
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 查找未过期的条目，过期条目会被顺便移除
    pub fn get(&self, key: &str) -> Option<CachedResponse> {
        let expired = match self.entries.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                self.hit_count.fetch_add(1, Ordering::Relaxed);
                return Some(entry.response.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove(key);
            tracing::debug!(key = %key, "Response cache entry expired");
        }
        self.miss_count.fetch_add(1, Ordering::Relaxed);
        None
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// 仅当 `generation` 之后没有发生过 `clear` 时才写入
    ///
    /// 写入后再检查一次：若期间有 `clear`，把刚写入的条目撤掉
    pub fn insert_if_generation(
        &self,
        key: impl Into<String>,
        response: CachedResponse,
        generation: u64,
    ) -> bool {
        if self.generation() != generation {
            return false;
        }

        let key = key.into();
        self.insert(key.clone(), response);

        if self.generation() != generation {
            self.entries.remove(&key);
            tracing::debug!(key = %key, "Discarded response rendered before cache clear");
            return false;
        }
        true
    }

    pub fn insert(&self, key: impl Into<String>, response: CachedResponse) {
        if self.max_entries == 0 {
            return;
        }

        let key = key.into();
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.evict_oldest();
        }

        self.entries.insert(
            key,
            CacheEntry {
                response,
                inserted_at: Instant::now(),
            },
        );
    }

    /// 清空所有条目（写操作后调用）
    pub fn clear(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        let count = self.entries.len();
        self.entries.clear();
        if count > 0 {
            tracing::info!(entries = count, "Response cache cleared");
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> ResponseCacheStats {
        ResponseCacheStats {
            total_entries: self.entries.len(),
            hit_count: self.hit_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
        }
    }

    fn evict_oldest(&self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.inserted_at)
            .map(|entry| entry.key().clone());

        if let Some(key) = oldest {
            self.entries.remove(&key);
            tracing::debug!(key = %key, "Response cache entry evicted");
        }
    }
}
