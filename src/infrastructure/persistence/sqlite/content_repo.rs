//! SQLite Content Repository - 章节与页面

use async_trait::async_trait;
use sqlx::FromRow;

use super::database::{db_error, parse_datetime};
use super::DbPool;
use crate::application::ports::{ChapterRecord, ContentRepositoryPort, PageRecord, RepositoryError};

const PAGE_COLUMNS: &str = "p.id AS id, p.chapter_id AS chapter_id, p.title AS title, \
     p.content AS content, p.page_number AS page_number, p.created AS created, p.updated AS updated";

/// SQLite Content Repository
pub struct SqliteContentRepository {
    pool: DbPool,
}

impl SqliteContentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ChapterRow {
    id: i64,
    book_id: i64,
    title: String,
    description: String,
    chapter_number: i64,
    created: String,
    updated: String,
}

impl TryFrom<ChapterRow> for ChapterRecord {
    type Error = RepositoryError;

    fn try_from(row: ChapterRow) -> Result<Self, Self::Error> {
        Ok(ChapterRecord {
            id: row.id,
            book_id: row.book_id,
            title: row.title,
            description: row.description,
            chapter_number: row.chapter_number,
            created: parse_datetime(&row.created)?,
            updated: parse_datetime(&row.updated)?,
        })
    }
}

#[derive(FromRow)]
struct PageRow {
    id: i64,
    chapter_id: i64,
    title: String,
    content: String,
    page_number: i64,
    created: String,
    updated: String,
}

impl TryFrom<PageRow> for PageRecord {
    type Error = RepositoryError;

    fn try_from(row: PageRow) -> Result<Self, Self::Error> {
        Ok(PageRecord {
            id: row.id,
            chapter_id: row.chapter_id,
            title: row.title,
            content: row.content,
            page_number: row.page_number,
            created: parse_datetime(&row.created)?,
            updated: parse_datetime(&row.updated)?,
        })
    }
}

fn into_pages(rows: Vec<PageRow>) -> Result<Vec<PageRecord>, RepositoryError> {
    rows.into_iter().map(PageRecord::try_from).collect()
}

#[async_trait]
impl ContentRepositoryPort for SqliteContentRepository {
    async fn save_chapter(&self, chapter: &ChapterRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO chapters (id, book_id, title, description, chapter_number, created, updated)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                chapter_number = excluded.chapter_number,
                updated = excluded.updated
            "#,
        )
        .bind(chapter.id)
        .bind(chapter.book_id)
        .bind(&chapter.title)
        .bind(&chapter.description)
        .bind(chapter.chapter_number)
        .bind(chapter.created.to_rfc3339())
        .bind(chapter.updated.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn save_page(&self, page: &PageRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO pages (id, chapter_id, title, content, page_number, created, updated)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                content = excluded.content,
                page_number = excluded.page_number,
                updated = excluded.updated
            "#,
        )
        .bind(page.id)
        .bind(page.chapter_id)
        .bind(&page.title)
        .bind(&page.content)
        .bind(page.page_number)
        .bind(page.created.to_rfc3339())
        .bind(page.updated.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn find_chapters(&self, book_id: i64) -> Result<Vec<ChapterRecord>, RepositoryError> {
        let rows: Vec<ChapterRow> = sqlx::query_as(
            "SELECT id, book_id, title, description, chapter_number, created, updated \
             FROM chapters WHERE book_id = ? ORDER BY chapter_number",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(ChapterRecord::try_from).collect()
    }

    async fn find_chapter(
        &self,
        book_id: i64,
        chapter_number: i64,
    ) -> Result<Option<ChapterRecord>, RepositoryError> {
        let row: Option<ChapterRow> = sqlx::query_as(
            "SELECT id, book_id, title, description, chapter_number, created, updated \
             FROM chapters WHERE book_id = ? AND chapter_number = ?",
        )
        .bind(book_id)
        .bind(chapter_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(ChapterRecord::try_from).transpose()
    }

    async fn find_pages(&self, chapter_id: i64) -> Result<Vec<PageRecord>, RepositoryError> {
        let query = format!(
            "SELECT {} FROM pages p WHERE p.chapter_id = ? ORDER BY p.page_number",
            PAGE_COLUMNS
        );

        let rows: Vec<PageRow> = sqlx::query_as(&query)
            .bind(chapter_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        into_pages(rows)
    }

    async fn find_pages_by_book(&self, book_id: i64) -> Result<Vec<PageRecord>, RepositoryError> {
        let query = format!(
            "SELECT {} FROM pages p JOIN chapters c ON c.id = p.chapter_id \
             WHERE c.book_id = ? ORDER BY c.chapter_number, p.page_number",
            PAGE_COLUMNS
        );

        let rows: Vec<PageRow> = sqlx::query_as(&query)
            .bind(book_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        into_pages(rows)
    }
}
