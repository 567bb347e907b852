//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（如 SQLite）

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use thiserror::Error;

use crate::domain::catalog::{BookStatus, ContactEmail, Rating};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Author / Genre
// ============================================================================

/// 作者实体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

/// 分类实体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
}

/// Author Repository Port
///
/// 目录中的"作者"指至少关联了一本书的用户，按 id 排序
#[async_trait]
pub trait AuthorRepositoryPort: Send + Sync {
    /// 保存作者
    async fn save(&self, author: &AuthorRecord) -> Result<(), RepositoryError>;

    /// 有作品的作者数量
    async fn count_with_books(&self) -> Result<usize, RepositoryError>;

    /// 按 id 顺序获取 `[start, end)` 范围内有作品的作者
    async fn find_with_books_range(
        &self,
        start: usize,
        end: usize,
    ) -> Result<Vec<AuthorRecord>, RepositoryError>;

    /// 根据 ID 查找有作品的作者
    async fn find_with_books_by_id(&self, id: i64) -> Result<Option<AuthorRecord>, RepositoryError>;
}

/// Genre Repository Port
#[async_trait]
pub trait GenreRepositoryPort: Send + Sync {
    async fn save(&self, genre: &GenreRecord) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<GenreRecord>, RepositoryError>;

    /// 获取所有分类（按标题排序）
    async fn find_all(&self) -> Result<Vec<GenreRecord>, RepositoryError>;
}

// ============================================================================
// Book Repository
// ============================================================================

/// 书籍实体（用于持久化）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub cover_image: Option<String>,
    pub status: BookStatus,
    pub published: NaiveDate,
    pub created: NaiveDate,
    pub updated: NaiveDate,
    pub authors: Vec<AuthorRecord>,
    pub genres: Vec<GenreRecord>,
}

/// 评分实体，每个 (book, user) 唯一
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingRecord {
    pub book_id: i64,
    pub user_id: i64,
    pub rating: Rating,
}

/// Book Repository Port
///
/// 列表查询的排序约定：标题升序，标题相同按 id 升序。
/// `*_range` 方法返回 `[start, end)` 范围的记录，与对应的 `count_*` 使用相同的过滤和排序。
#[async_trait]
pub trait BookRepositoryPort: Send + Sync {
    /// 保存书籍（包括作者和分类关联）
    async fn save(&self, book: &BookRecord) -> Result<(), RepositoryError>;

    /// 已发布书籍数量
    async fn count_released(&self) -> Result<usize, RepositoryError>;

    /// 分页获取已发布书籍
    async fn find_released_range(
        &self,
        start: usize,
        end: usize,
    ) -> Result<Vec<BookRecord>, RepositoryError>;

    /// 根据 ID 查找已发布书籍
    async fn find_released_by_id(&self, id: i64) -> Result<Option<BookRecord>, RepositoryError>;

    /// 平均分最高的已发布书籍，同分按发布日期升序
    async fn find_top_rated(&self, limit: usize) -> Result<Vec<BookRecord>, RepositoryError>;

    /// 作者的书籍数量（不区分发布状态）
    async fn count_by_author(&self, author_id: i64) -> Result<usize, RepositoryError>;

    async fn find_by_author_range(
        &self,
        author_id: i64,
        start: usize,
        end: usize,
    ) -> Result<Vec<BookRecord>, RepositoryError>;

    /// 某分类下已发布书籍数量
    async fn count_released_by_genre(&self, genre_id: i64) -> Result<usize, RepositoryError>;

    async fn find_released_by_genre_range(
        &self,
        genre_id: i64,
        start: usize,
        end: usize,
    ) -> Result<Vec<BookRecord>, RepositoryError>;

    /// 批量获取评分，返回 book_id -> ratings
    async fn find_ratings(
        &self,
        book_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Rating>>, RepositoryError>;

    /// 新增或覆盖用户对书籍的评分
    async fn upsert_rating(&self, rating: &RatingRecord) -> Result<(), RepositoryError>;
}

// ============================================================================
// Content Repository (Chapter / Page)
// ============================================================================

/// 章节实体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterRecord {
    pub id: i64,
    pub book_id: i64,
    pub title: String,
    pub description: String,
    pub chapter_number: i64,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// 页面实体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    pub id: i64,
    pub chapter_id: i64,
    pub title: String,
    pub content: String,
    pub page_number: i64,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Content Repository Port
#[async_trait]
pub trait ContentRepositoryPort: Send + Sync {
    async fn save_chapter(&self, chapter: &ChapterRecord) -> Result<(), RepositoryError>;

    async fn save_page(&self, page: &PageRecord) -> Result<(), RepositoryError>;

    /// 书籍的所有章节（按 chapter_number 升序）
    async fn find_chapters(&self, book_id: i64) -> Result<Vec<ChapterRecord>, RepositoryError>;

    /// 根据章节号查找章节
    async fn find_chapter(
        &self,
        book_id: i64,
        chapter_number: i64,
    ) -> Result<Option<ChapterRecord>, RepositoryError>;

    /// 章节的所有页面（按 page_number 升序）
    async fn find_pages(&self, chapter_id: i64) -> Result<Vec<PageRecord>, RepositoryError>;

    /// 书籍的所有页面（按 chapter_number、page_number 升序）
    async fn find_pages_by_book(&self, book_id: i64) -> Result<Vec<PageRecord>, RepositoryError>;
}

// ============================================================================
// Info Repository (Announcement / Contact)
// ============================================================================

/// 公告实体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnouncementRecord {
    pub id: i64,
    pub title: String,
    pub content: String,
}

/// 联系我们留言
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessageRecord {
    pub email: ContactEmail,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Info Repository Port
#[async_trait]
pub trait InfoRepositoryPort: Send + Sync {
    async fn save_announcement(&self, announcement: &AnnouncementRecord)
        -> Result<(), RepositoryError>;

    /// 最新的公告（id 最大）
    async fn find_latest_announcement(&self) -> Result<Option<AnnouncementRecord>, RepositoryError>;

    /// 保存留言，返回新记录 id
    async fn save_contact_message(
        &self,
        message: &ContactMessageRecord,
    ) -> Result<i64, RepositoryError>;
}
