//! Data Transfer Objects
//!
//! 统一的响应信封：
//! `{"status": "success"|"error", "data": {"message", "payload", "error": {"details"}}}`

use serde::{Deserialize, Serialize};

use crate::application::{AuthorResponse, BookResponse, ChapterResponse, GenreResponse, PageResponse};
use crate::domain::PageResult;

/// 分页游标中表示"没有上一页/下一页"的值
pub const NO_PAGE: i64 = -1;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    pub data: ResponseData<T>,
}

#[derive(Debug, Serialize)]
pub struct ResponseData<T: Serialize> {
    pub message: String,
    pub payload: Option<T>,
    pub error: Option<ErrorDetails>,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub details: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(message: impl Into<String>, payload: T) -> Self {
        Self {
            status: "success",
            data: ResponseData {
                message: message.into(),
                payload: Some(payload),
                error: None,
            },
        }
    }
}

impl ApiResponse<()> {
    /// 错误响应
    pub fn error(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            status: "error",
            data: ResponseData {
                message: message.into(),
                payload: None,
                error: Some(ErrorDetails {
                    details: Some(details.into()),
                }),
            },
        }
    }
}

// ============================================================================
// 请求参数
// ============================================================================

/// 分页查询参数，`offset` 是页索引
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct BookIdParams {
    pub book_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct ChapterPagesParams {
    pub book_id: i64,
    pub chapter_number: i64,
}

#[derive(Debug, Deserialize)]
pub struct GenreBooksParams {
    pub genre_id: i64,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl GenreBooksParams {
    pub fn page(&self) -> PageParams {
        PageParams {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AuthorIdParams {
    pub author_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct AuthorBooksParams {
    pub author_id: i64,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl AuthorBooksParams {
    pub fn page(&self) -> PageParams {
        PageParams {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RateBookRequest {
    pub book_id: i64,
    pub user_id: i64,
    pub rating: i64,
}

#[derive(Debug, Deserialize)]
pub struct ContactUsRequest {
    pub email: String,
    pub message: String,
}

// ============================================================================
// Payloads
// ============================================================================

fn cursor(page: Option<usize>) -> i64 {
    page.map(|p| p as i64).unwrap_or(NO_PAGE)
}

#[derive(Debug, Serialize)]
pub struct PaginatedBooks {
    pub books: Vec<BookResponse>,
    pub next_page: i64,
    pub prev_page: i64,
}

impl From<PageResult<BookResponse>> for PaginatedBooks {
    fn from(page: PageResult<BookResponse>) -> Self {
        Self {
            next_page: cursor(page.next_page),
            prev_page: cursor(page.prev_page),
            books: page.items,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaginatedAuthors {
    pub authors: Vec<AuthorResponse>,
    pub next_page: i64,
    pub prev_page: i64,
}

impl From<PageResult<AuthorResponse>> for PaginatedAuthors {
    fn from(page: PageResult<AuthorResponse>) -> Self {
        Self {
            next_page: cursor(page.next_page),
            prev_page: cursor(page.prev_page),
            authors: page.items,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BooksPayload {
    pub books: Vec<BookResponse>,
}

#[derive(Debug, Serialize)]
pub struct ChaptersPayload {
    pub chapters: Vec<ChapterResponse>,
}

#[derive(Debug, Serialize)]
pub struct PagesPayload {
    pub pages: Vec<PageResponse>,
}

#[derive(Debug, Serialize)]
pub struct GenresPayload {
    pub genres: Vec<GenreResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_shapes() {
        let ok = serde_json::to_value(ApiResponse::success("done", json!({"x": 1}))).unwrap();
        assert_eq!(
            ok,
            json!({
                "status": "success",
                "data": {"message": "done", "payload": {"x": 1}, "error": null}
            })
        );

        let err = serde_json::to_value(ApiResponse::error("This page is empty", "empty page"))
            .unwrap();
        assert_eq!(
            err,
            json!({
                "status": "error",
                "data": {
                    "message": "This page is empty",
                    "payload": null,
                    "error": {"details": "empty page"}
                }
            })
        );
    }

    #[test]
    fn test_missing_cursor_is_minus_one() {
        let page = PageResult::<AuthorResponse> {
            items: vec![],
            effective_limit: 2,
            next_page: None,
            prev_page: Some(3),
        };
        let payload = PaginatedAuthors::from(page);
        assert_eq!(payload.next_page, NO_PAGE);
        assert_eq!(payload.prev_page, 3);
    }
}
