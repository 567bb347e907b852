//! Health check

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::state::AppState;
use crate::infrastructure::memory::ResponseCacheStats;

#[derive(Debug, Serialize)]
pub struct PingPayload {
    pub service: &'static str,
    pub version: &'static str,
    /// 缓存关闭时为 null
    pub cache: Option<ResponseCacheStats>,
}

pub async fn ping(State(state): State<Arc<AppState>>) -> Json<ApiResponse<PingPayload>> {
    let cache = state.response_cache.as_ref().map(|cache| cache.stats());
    if let Some(stats) = &cache {
        tracing::debug!(
            entries = stats.total_entries,
            hits = stats.hit_count,
            misses = stats.miss_count,
            "Response cache stats"
        );
    }

    Json(ApiResponse::success(
        "pong",
        PingPayload {
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            cache,
        },
    ))
}
