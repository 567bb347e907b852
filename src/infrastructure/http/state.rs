//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use super::dto::PageParams;
use super::error::ApiError;
use crate::application::{
    // Services
    CatalogService,
    // Command handlers
    RateBookHandler, SubmitContactMessageHandler,
    // Query handlers
    GetAuthorHandler, GetBookChaptersHandler, GetBookContentHandler, GetBookHandler,
    GetChapterPagesHandler, GetLatestAnnouncementHandler, ListAuthorBooksHandler,
    ListAuthorsHandler, ListBooksHandler, ListGenreBooksHandler, ListGenresHandler,
    TopBooksHandler,
    // Ports
    AuthorRepositoryPort, BookRepositoryPort, ContentRepositoryPort, GenreRepositoryPort,
    InfoRepositoryPort,
};
use crate::config::{AppConfig, PaginationConfig};
use crate::domain::PageRequest;
use crate::infrastructure::memory::ResponseCache;

/// 应用状态
pub struct AppState {
    // ========== Settings ==========
    pub pagination: PaginationConfig,
    pub top_books: usize,
    /// 未启用缓存时为 None
    pub response_cache: Option<Arc<ResponseCache>>,

    // ========== Command Handlers ==========
    pub rate_book_handler: RateBookHandler,
    pub submit_contact_message_handler: SubmitContactMessageHandler,

    // ========== Query Handlers ==========
    pub list_books_handler: ListBooksHandler,
    pub get_book_handler: GetBookHandler,
    pub top_books_handler: TopBooksHandler,
    pub get_book_chapters_handler: GetBookChaptersHandler,
    pub get_chapter_pages_handler: GetChapterPagesHandler,
    pub get_book_content_handler: GetBookContentHandler,
    pub list_genres_handler: ListGenresHandler,
    pub list_genre_books_handler: ListGenreBooksHandler,
    pub list_authors_handler: ListAuthorsHandler,
    pub get_author_handler: GetAuthorHandler,
    pub list_author_books_handler: ListAuthorBooksHandler,
    pub get_announcement_handler: GetLatestAnnouncementHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        book_repo: Arc<dyn BookRepositoryPort>,
        author_repo: Arc<dyn AuthorRepositoryPort>,
        genre_repo: Arc<dyn GenreRepositoryPort>,
        content_repo: Arc<dyn ContentRepositoryPort>,
        info_repo: Arc<dyn InfoRepositoryPort>,
        config: &AppConfig,
    ) -> Self {
        let catalog = Arc::new(CatalogService::new(
            book_repo.clone(),
            author_repo.clone(),
            genre_repo.clone(),
            content_repo.clone(),
        ));

        let response_cache = config
            .cache
            .enabled
            .then(|| ResponseCache::from_config(&config.cache).arc());

        Self {
            pagination: config.pagination.clone(),
            top_books: config.catalog.top_books,
            response_cache,

            // Command handlers
            rate_book_handler: RateBookHandler::new(book_repo.clone()),
            submit_contact_message_handler: SubmitContactMessageHandler::new(info_repo.clone()),

            // Query handlers
            list_books_handler: ListBooksHandler::new(catalog.clone()),
            get_book_handler: GetBookHandler::new(catalog.clone(), book_repo.clone()),
            top_books_handler: TopBooksHandler::new(catalog.clone(), book_repo.clone()),
            get_book_chapters_handler: GetBookChaptersHandler::new(
                book_repo.clone(),
                content_repo.clone(),
            ),
            get_chapter_pages_handler: GetChapterPagesHandler::new(book_repo, content_repo),
            get_book_content_handler: GetBookContentHandler::new(catalog.clone()),
            list_genres_handler: ListGenresHandler::new(genre_repo),
            list_genre_books_handler: ListGenreBooksHandler::new(catalog.clone()),
            list_authors_handler: ListAuthorsHandler::new(catalog.clone()),
            get_author_handler: GetAuthorHandler::new(author_repo),
            list_author_books_handler: ListAuthorBooksHandler::new(catalog),
            get_announcement_handler: GetLatestAnnouncementHandler::new(info_repo),
        }
    }

    /// 把查询参数转换为分页请求，超过 `max_limit` 的请求直接拒绝
    pub fn page_request(&self, params: &PageParams) -> Result<PageRequest, ApiError> {
        let limit = params.limit.unwrap_or(self.pagination.default_limit);
        if limit > self.pagination.max_limit {
            return Err(ApiError::BadRequest(format!(
                "limit must not exceed {}, got {}",
                self.pagination.max_limit, limit
            )));
        }

        PageRequest::new(limit, params.offset.unwrap_or(0))
            .map_err(|e| ApiError::BadRequest(e.to_string()))
    }

    /// 写操作之后使缓存的读响应失效
    pub fn invalidate_cache(&self) {
        if let Some(cache) = &self.response_cache {
            cache.clear();
        }
    }
}
