//! SQLite Book Repository

use async_trait::async_trait;
use sqlx::FromRow;
use std::collections::HashMap;

use super::database::{db_error, format_date, limit_offset, parse_date, placeholders};
use super::DbPool;
use crate::application::ports::{
    AuthorRecord, BookRecord, BookRepositoryPort, GenreRecord, RatingRecord, RepositoryError,
};
use crate::domain::catalog::{BookStatus, Rating};

const BOOK_COLUMNS: &str = "b.id AS id, b.title AS title, b.description AS description, \
     b.cover_image AS cover_image, b.status AS status, b.published AS published, \
     b.created AS created, b.updated AS updated";

/// SQLite Book Repository
pub struct SqliteBookRepository {
    pool: DbPool,
}

impl SqliteBookRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// 批量加载作者和分类关联，保持 rows 的顺序
    async fn with_relations(&self, rows: Vec<BookRow>) -> Result<Vec<BookRecord>, RepositoryError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut authors = self.authors_by_book(&ids).await?;
        let mut genres = self.genres_by_book(&ids).await?;

        rows.into_iter()
            .map(|row| {
                let id = row.id;
                row.into_record(
                    authors.remove(&id).unwrap_or_default(),
                    genres.remove(&id).unwrap_or_default(),
                )
            })
            .collect()
    }

    async fn authors_by_book(
        &self,
        book_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<AuthorRecord>>, RepositoryError> {
        let query = format!(
            "SELECT ba.book_id AS book_id, a.id AS id, a.first_name AS first_name, a.last_name AS last_name \
             FROM book_authors ba JOIN authors a ON a.id = ba.author_id \
             WHERE ba.book_id IN ({}) ORDER BY a.id",
            placeholders(book_ids.len())
        );

        let mut sql_query = sqlx::query_as::<_, BookAuthorRow>(&query);
        for id in book_ids {
            sql_query = sql_query.bind(*id);
        }

        let rows = sql_query.fetch_all(&self.pool).await.map_err(db_error)?;

        let mut map: HashMap<i64, Vec<AuthorRecord>> = HashMap::new();
        for row in rows {
            map.entry(row.book_id).or_default().push(AuthorRecord {
                id: row.id,
                first_name: row.first_name,
                last_name: row.last_name,
            });
        }
        Ok(map)
    }

    async fn genres_by_book(
        &self,
        book_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<GenreRecord>>, RepositoryError> {
        let query = format!(
            "SELECT bg.book_id AS book_id, g.id AS id, g.title AS title, g.description AS description \
             FROM book_genres bg JOIN genres g ON g.id = bg.genre_id \
             WHERE bg.book_id IN ({}) ORDER BY g.title",
            placeholders(book_ids.len())
        );

        let mut sql_query = sqlx::query_as::<_, BookGenreRow>(&query);
        for id in book_ids {
            sql_query = sql_query.bind(*id);
        }

        let rows = sql_query.fetch_all(&self.pool).await.map_err(db_error)?;

        let mut map: HashMap<i64, Vec<GenreRecord>> = HashMap::new();
        for row in rows {
            map.entry(row.book_id).or_default().push(GenreRecord {
                id: row.id,
                title: row.title,
                description: row.description,
            });
        }
        Ok(map)
    }
}

#[derive(FromRow)]
struct BookRow {
    id: i64,
    title: String,
    description: String,
    cover_image: Option<String>,
    status: String,
    published: String,
    created: String,
    updated: String,
}

impl BookRow {
    fn into_record(
        self,
        authors: Vec<AuthorRecord>,
        genres: Vec<GenreRecord>,
    ) -> Result<BookRecord, RepositoryError> {
        Ok(BookRecord {
            id: self.id,
            title: self.title,
            description: self.description,
            cover_image: self.cover_image,
            status: BookStatus::parse(&self.status)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            published: parse_date(&self.published)?,
            created: parse_date(&self.created)?,
            updated: parse_date(&self.updated)?,
            authors,
            genres,
        })
    }
}

#[derive(FromRow)]
struct BookAuthorRow {
    book_id: i64,
    id: i64,
    first_name: String,
    last_name: String,
}

#[derive(FromRow)]
struct BookGenreRow {
    book_id: i64,
    id: i64,
    title: String,
    description: String,
}

#[derive(FromRow)]
struct RatingRow {
    book_id: i64,
    rating: i64,
}

#[async_trait]
impl BookRepositoryPort for SqliteBookRepository {
    async fn save(&self, book: &BookRecord) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        sqlx::query(
            r#"
            INSERT INTO books (id, title, description, cover_image, status, published, created, updated)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                cover_image = excluded.cover_image,
                status = excluded.status,
                published = excluded.published,
                updated = excluded.updated
            "#,
        )
        .bind(book.id)
        .bind(&book.title)
        .bind(&book.description)
        .bind(&book.cover_image)
        .bind(book.status.as_str())
        .bind(format_date(book.published))
        .bind(format_date(book.created))
        .bind(format_date(book.updated))
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        sqlx::query("DELETE FROM book_authors WHERE book_id = ?")
            .bind(book.id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        for author in &book.authors {
            sqlx::query("INSERT INTO book_authors (book_id, author_id) VALUES (?, ?)")
                .bind(book.id)
                .bind(author.id)
                .execute(&mut *tx)
                .await
                .map_err(db_error)?;
        }

        sqlx::query("DELETE FROM book_genres WHERE book_id = ?")
            .bind(book.id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        for genre in &book.genres {
            sqlx::query("INSERT INTO book_genres (book_id, genre_id) VALUES (?, ?)")
                .bind(book.id)
                .bind(genre.id)
                .execute(&mut *tx)
                .await
                .map_err(db_error)?;
        }

        tx.commit().await.map_err(db_error)?;

        Ok(())
    }

    async fn count_released(&self) -> Result<usize, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE status = 'r'")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(count as usize)
    }

    async fn find_released_range(
        &self,
        start: usize,
        end: usize,
    ) -> Result<Vec<BookRecord>, RepositoryError> {
        let (limit, offset) = limit_offset(start, end);
        let query = format!(
            "SELECT {} FROM books b WHERE b.status = 'r' ORDER BY b.title, b.id LIMIT ? OFFSET ?",
            BOOK_COLUMNS
        );

        let rows: Vec<BookRow> = sqlx::query_as(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        self.with_relations(rows).await
    }

    async fn find_released_by_id(&self, id: i64) -> Result<Option<BookRecord>, RepositoryError> {
        let query = format!(
            "SELECT {} FROM books b WHERE b.id = ? AND b.status = 'r'",
            BOOK_COLUMNS
        );

        let row: Option<BookRow> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        match row {
            Some(row) => Ok(self.with_relations(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_top_rated(&self, limit: usize) -> Result<Vec<BookRecord>, RepositoryError> {
        let query = format!(
            "SELECT {} FROM books b LEFT JOIN ratings r ON r.book_id = b.id \
             WHERE b.status = 'r' \
             GROUP BY b.id \
             ORDER BY COALESCE(AVG(r.rating), 0) DESC, b.published ASC, b.id ASC \
             LIMIT ?",
            BOOK_COLUMNS
        );

        let rows: Vec<BookRow> = sqlx::query_as(&query)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        self.with_relations(rows).await
    }

    async fn count_by_author(&self, author_id: i64) -> Result<usize, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM books b JOIN book_authors ba ON ba.book_id = b.id WHERE ba.author_id = ?",
        )
        .bind(author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(count as usize)
    }

    async fn find_by_author_range(
        &self,
        author_id: i64,
        start: usize,
        end: usize,
    ) -> Result<Vec<BookRecord>, RepositoryError> {
        let (limit, offset) = limit_offset(start, end);
        let query = format!(
            "SELECT {} FROM books b JOIN book_authors ba ON ba.book_id = b.id \
             WHERE ba.author_id = ? ORDER BY b.title, b.id LIMIT ? OFFSET ?",
            BOOK_COLUMNS
        );

        let rows: Vec<BookRow> = sqlx::query_as(&query)
            .bind(author_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        self.with_relations(rows).await
    }

    async fn count_released_by_genre(&self, genre_id: i64) -> Result<usize, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM books b JOIN book_genres bg ON bg.book_id = b.id \
             WHERE bg.genre_id = ? AND b.status = 'r'",
        )
        .bind(genre_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(count as usize)
    }

    async fn find_released_by_genre_range(
        &self,
        genre_id: i64,
        start: usize,
        end: usize,
    ) -> Result<Vec<BookRecord>, RepositoryError> {
        let (limit, offset) = limit_offset(start, end);
        let query = format!(
            "SELECT {} FROM books b JOIN book_genres bg ON bg.book_id = b.id \
             WHERE bg.genre_id = ? AND b.status = 'r' ORDER BY b.title, b.id LIMIT ? OFFSET ?",
            BOOK_COLUMNS
        );

        let rows: Vec<BookRow> = sqlx::query_as(&query)
            .bind(genre_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        self.with_relations(rows).await
    }

    async fn find_ratings(
        &self,
        book_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Rating>>, RepositoryError> {
        if book_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let query = format!(
            "SELECT book_id, rating FROM ratings WHERE book_id IN ({}) ORDER BY book_id, user_id",
            placeholders(book_ids.len())
        );

        let mut sql_query = sqlx::query_as::<_, RatingRow>(&query);
        for id in book_ids {
            sql_query = sql_query.bind(*id);
        }

        let rows = sql_query.fetch_all(&self.pool).await.map_err(db_error)?;

        let mut map: HashMap<i64, Vec<Rating>> = HashMap::new();
        for row in rows {
            let rating = Rating::new(row.rating)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
            map.entry(row.book_id).or_default().push(rating);
        }
        Ok(map)
    }

    async fn upsert_rating(&self, rating: &RatingRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO ratings (book_id, user_id, rating)
            VALUES (?, ?, ?)
            ON CONFLICT(book_id, user_id) DO UPDATE SET rating = excluded.rating
            "#,
        )
        .bind(rating.book_id)
        .bind(rating.user_id)
        .bind(rating.rating.value() as i64)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }
}
