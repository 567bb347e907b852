//! Memory Layer - In-Memory State Management
//!
//! 实现 HTTP 读接口的响应缓存

mod response_cache;

pub use response_cache::{CachedResponse, ResponseCache, ResponseCacheStats};
