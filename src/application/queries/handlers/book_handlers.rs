//! Book Query Handlers

use serde::Serialize;
use std::sync::Arc;

use crate::application::catalog::CatalogService;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    AuthorRecord, BookRecord, BookRepositoryPort, ChapterRecord, ContentRepositoryPort,
    GenreRecord, GenreRepositoryPort, PageRecord,
};
use crate::application::queries::{
    GetBook, GetBookChapters, GetBookContent, GetChapterPages, ListBooks, ListGenreBooks,
    ListGenres, TopBooks,
};
use crate::domain::catalog::{ContentTree, DEFAULT_AVERAGE_RATING};
use crate::domain::PageResult;

// ============================================================================
// Response DTOs
// ============================================================================

/// 作者响应
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl From<AuthorRecord> for AuthorResponse {
    fn from(record: AuthorRecord) -> Self {
        Self {
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
        }
    }
}

/// 分类响应
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
}

impl From<GenreRecord> for GenreResponse {
    fn from(record: GenreRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
        }
    }
}

/// 书籍响应（附带平均评分）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(rename = "genre")]
    pub genres: Vec<GenreResponse>,
    pub authors: Vec<AuthorResponse>,
    pub cover_image: Option<String>,
    pub published: String,
    pub rating: String,
}

impl BookResponse {
    pub fn from_record(record: BookRecord, rating: String) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            genres: record.genres.into_iter().map(GenreResponse::from).collect(),
            authors: record.authors.into_iter().map(AuthorResponse::from).collect(),
            cover_image: record.cover_image,
            published: record.published.format("%Y-%m-%d").to_string(),
            rating,
        }
    }
}

/// 章节响应
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChapterResponse {
    pub id: i64,
    pub book: i64,
    pub title: String,
    pub chapter_number: i64,
    pub created: String,
    pub updated: String,
}

impl From<ChapterRecord> for ChapterResponse {
    fn from(record: ChapterRecord) -> Self {
        Self {
            id: record.id,
            book: record.book_id,
            title: record.title,
            chapter_number: record.chapter_number,
            created: record.created.to_rfc3339(),
            updated: record.updated.to_rfc3339(),
        }
    }
}

/// 页面响应
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResponse {
    pub id: i64,
    pub chapter: i64,
    pub title: String,
    pub content: String,
    pub page_number: i64,
    pub created: String,
    pub updated: String,
}

impl From<PageRecord> for PageResponse {
    fn from(record: PageRecord) -> Self {
        Self {
            id: record.id,
            chapter: record.chapter_id,
            title: record.title,
            content: record.content,
            page_number: record.page_number,
            created: record.created.to_rfc3339(),
            updated: record.updated.to_rfc3339(),
        }
    }
}

/// 为一组书籍附加平均评分
async fn rate_books(
    catalog: &CatalogService,
    books: Vec<BookRecord>,
) -> Result<Vec<BookResponse>, ApplicationError> {
    let mut averages = catalog.average_ratings(&books).await?;
    Ok(books
        .into_iter()
        .map(|book| {
            let rating = averages
                .remove(&book.id)
                .unwrap_or_else(|| DEFAULT_AVERAGE_RATING.to_string());
            BookResponse::from_record(book, rating)
        })
        .collect())
}

/// 为一页书籍附加平均评分，保持分页元数据不变
pub(super) async fn rate_page(
    catalog: &CatalogService,
    page: PageResult<BookRecord>,
) -> Result<PageResult<BookResponse>, ApplicationError> {
    let PageResult {
        items,
        effective_limit,
        next_page,
        prev_page,
    } = page;

    Ok(PageResult {
        items: rate_books(catalog, items).await?,
        effective_limit,
        next_page,
        prev_page,
    })
}

// ============================================================================
// Handlers
// ============================================================================

/// ListBooks Handler
pub struct ListBooksHandler {
    catalog: Arc<CatalogService>,
}

impl ListBooksHandler {
    pub fn new(catalog: Arc<CatalogService>) -> Self {
        Self { catalog }
    }

    pub async fn handle(
        &self,
        query: ListBooks,
    ) -> Result<PageResult<BookResponse>, ApplicationError> {
        let page = self.catalog.list_books(&query.page).await?;
        rate_page(&self.catalog, page).await
    }
}

/// GetBook Handler
pub struct GetBookHandler {
    catalog: Arc<CatalogService>,
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl GetBookHandler {
    pub fn new(catalog: Arc<CatalogService>, book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { catalog, book_repo }
    }

    pub async fn handle(&self, query: GetBook) -> Result<BookResponse, ApplicationError> {
        let book = self
            .book_repo
            .find_released_by_id(query.book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", query.book_id))?;

        let mut rated = rate_books(&self.catalog, vec![book]).await?;
        rated
            .pop()
            .ok_or_else(|| ApplicationError::internal("rated book missing"))
    }
}

/// TopBooks Handler
pub struct TopBooksHandler {
    catalog: Arc<CatalogService>,
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl TopBooksHandler {
    pub fn new(catalog: Arc<CatalogService>, book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { catalog, book_repo }
    }

    pub async fn handle(&self, query: TopBooks) -> Result<Vec<BookResponse>, ApplicationError> {
        let books = self.book_repo.find_top_rated(query.limit).await?;
        rate_books(&self.catalog, books).await
    }
}

/// GetBookChapters Handler
pub struct GetBookChaptersHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    content_repo: Arc<dyn ContentRepositoryPort>,
}

impl GetBookChaptersHandler {
    pub fn new(
        book_repo: Arc<dyn BookRepositoryPort>,
        content_repo: Arc<dyn ContentRepositoryPort>,
    ) -> Self {
        Self {
            book_repo,
            content_repo,
        }
    }

    pub async fn handle(
        &self,
        query: GetBookChapters,
    ) -> Result<Vec<ChapterResponse>, ApplicationError> {
        self.book_repo
            .find_released_by_id(query.book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", query.book_id))?;

        let chapters = self.content_repo.find_chapters(query.book_id).await?;
        Ok(chapters.into_iter().map(ChapterResponse::from).collect())
    }
}

/// GetChapterPages Handler
pub struct GetChapterPagesHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    content_repo: Arc<dyn ContentRepositoryPort>,
}

impl GetChapterPagesHandler {
    pub fn new(
        book_repo: Arc<dyn BookRepositoryPort>,
        content_repo: Arc<dyn ContentRepositoryPort>,
    ) -> Self {
        Self {
            book_repo,
            content_repo,
        }
    }

    pub async fn handle(
        &self,
        query: GetChapterPages,
    ) -> Result<Vec<PageResponse>, ApplicationError> {
        self.book_repo
            .find_released_by_id(query.book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", query.book_id))?;

        let chapter = self
            .content_repo
            .find_chapter(query.book_id, query.chapter_number)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Chapter", query.chapter_number))?;

        let pages = self.content_repo.find_pages(chapter.id).await?;
        Ok(pages.into_iter().map(PageResponse::from).collect())
    }
}

/// GetBookContent Handler
pub struct GetBookContentHandler {
    catalog: Arc<CatalogService>,
}

impl GetBookContentHandler {
    pub fn new(catalog: Arc<CatalogService>) -> Self {
        Self { catalog }
    }

    pub async fn handle(&self, query: GetBookContent) -> Result<ContentTree, ApplicationError> {
        self.catalog.book_content(query.book_id).await
    }
}

/// ListGenres Handler
pub struct ListGenresHandler {
    genre_repo: Arc<dyn GenreRepositoryPort>,
}

impl ListGenresHandler {
    pub fn new(genre_repo: Arc<dyn GenreRepositoryPort>) -> Self {
        Self { genre_repo }
    }

    pub async fn handle(&self, _query: ListGenres) -> Result<Vec<GenreResponse>, ApplicationError> {
        let genres = self.genre_repo.find_all().await?;
        Ok(genres.into_iter().map(GenreResponse::from).collect())
    }
}

/// ListGenreBooks Handler
pub struct ListGenreBooksHandler {
    catalog: Arc<CatalogService>,
}

impl ListGenreBooksHandler {
    pub fn new(catalog: Arc<CatalogService>) -> Self {
        Self { catalog }
    }

    pub async fn handle(
        &self,
        query: ListGenreBooks,
    ) -> Result<PageResult<BookResponse>, ApplicationError> {
        let page = self
            .catalog
            .list_genre_books(query.genre_id, &query.page)
            .await?;
        rate_page(&self.catalog, page).await
    }
}
