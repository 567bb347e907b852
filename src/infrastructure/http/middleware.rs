//! HTTP Middleware
//!
//! - 状态码错误日志
//! - GET 响应缓存

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::infrastructure::memory::{CachedResponse, ResponseCache};

/// 标记响应是否来自缓存
pub const CACHE_STATUS_HEADER: &str = "x-cache";

/// 超过该大小的响应体不缓存
const MAX_CACHED_BODY_BYTES: usize = 4 * 1024 * 1024;

/// HTTP 状态码错误日志中间件
///
/// 业务层面的错误细节在 `ApiError::into_response()` 中记录，这里只记录请求行和状态码
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP client error"
        );
    }

    response
}

/// 响应缓存中间件
///
/// 以完整 URI（路径 + 查询串）为 key，只缓存 200 的 GET 响应
pub async fn response_cache_middleware(
    State(cache): State<Arc<ResponseCache>>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::GET {
        return next.run(request).await;
    }

    let key = request.uri().to_string();
    if let Some(cached) = cache.get(&key) {
        tracing::debug!(key = %key, "Response cache hit");
        return cached_response(cached);
    }

    let generation = cache.generation();
    let response = next.run(request).await;
    if response.status() != StatusCode::OK {
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = match to_bytes(body, MAX_CACHED_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(key = %key, error = %e, "Failed to buffer response body");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    cache.insert_if_generation(
        key,
        CachedResponse {
            content_type: parts
                .headers
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body: bytes.clone(),
        },
        generation,
    );

    let mut response = Response::from_parts(parts, Body::from(bytes));
    response
        .headers_mut()
        .insert(CACHE_STATUS_HEADER, HeaderValue::from_static("MISS"));
    response
}

fn cached_response(cached: CachedResponse) -> Response {
    let mut response = Response::new(Body::from(cached.body));
    let headers = response.headers_mut();
    if let Some(value) = cached
        .content_type
        .and_then(|ct| HeaderValue::from_str(&ct).ok())
    {
        headers.insert(header::CONTENT_TYPE, value);
    }
    headers.insert(CACHE_STATUS_HEADER, HeaderValue::from_static("HIT"));
    response
}
