//! SQLite Author Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::database::{db_error, limit_offset};
use super::DbPool;
use crate::application::ports::{AuthorRecord, AuthorRepositoryPort, RepositoryError};

/// SQLite Author Repository
pub struct SqliteAuthorRepository {
    pool: DbPool,
}

impl SqliteAuthorRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct AuthorRow {
    id: i64,
    first_name: String,
    last_name: String,
}

impl From<AuthorRow> for AuthorRecord {
    fn from(row: AuthorRow) -> Self {
        AuthorRecord {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
        }
    }
}

#[async_trait]
impl AuthorRepositoryPort for SqliteAuthorRepository {
    async fn save(&self, author: &AuthorRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO authors (id, first_name, last_name)
            VALUES (?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                first_name = excluded.first_name,
                last_name = excluded.last_name
            "#,
        )
        .bind(author.id)
        .bind(&author.first_name)
        .bind(&author.last_name)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn count_with_books(&self) -> Result<usize, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM authors a \
             WHERE EXISTS (SELECT 1 FROM book_authors ba WHERE ba.author_id = a.id)",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(count as usize)
    }

    async fn find_with_books_range(
        &self,
        start: usize,
        end: usize,
    ) -> Result<Vec<AuthorRecord>, RepositoryError> {
        let (limit, offset) = limit_offset(start, end);

        let rows: Vec<AuthorRow> = sqlx::query_as(
            "SELECT a.id, a.first_name, a.last_name FROM authors a \
             WHERE EXISTS (SELECT 1 FROM book_authors ba WHERE ba.author_id = a.id) \
             ORDER BY a.id LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(AuthorRecord::from).collect())
    }

    async fn find_with_books_by_id(&self, id: i64) -> Result<Option<AuthorRecord>, RepositoryError> {
        let row: Option<AuthorRow> = sqlx::query_as(
            "SELECT a.id, a.first_name, a.last_name FROM authors a \
             WHERE a.id = ? AND EXISTS (SELECT 1 FROM book_authors ba WHERE ba.author_id = a.id)",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(AuthorRecord::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{BookRecord, BookRepositoryPort};
    use crate::domain::catalog::BookStatus;
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteBookRepository,
    };
    use chrono::NaiveDate;

    fn author(id: i64, first: &str) -> AuthorRecord {
        AuthorRecord {
            id,
            first_name: first.to_string(),
            last_name: "Writer".to_string(),
        }
    }

    #[tokio::test]
    async fn test_only_authors_with_books_are_listed() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let repo = SqliteAuthorRepository::new(pool.clone());
        for a in [author(1, "One"), author(2, "Two"), author(3, "Three")] {
            repo.save(&a).await.unwrap();
        }

        let day = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let books = SqliteBookRepository::new(pool);
        books
            .save(&BookRecord {
                id: 10,
                title: "Shared".to_string(),
                description: String::new(),
                cover_image: None,
                status: BookStatus::Draft,
                published: day,
                created: day,
                updated: day,
                authors: vec![author(3, "Three"), author(1, "One")],
                genres: vec![],
            })
            .await
            .unwrap();

        assert_eq!(repo.count_with_books().await.unwrap(), 2);

        let listed = repo.find_with_books_range(0, 5).await.unwrap();
        let ids: Vec<i64> = listed.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 3]);

        let listed = repo.find_with_books_range(1, 2).await.unwrap();
        assert_eq!(listed, vec![author(3, "Three")]);

        assert!(repo.find_with_books_by_id(2).await.unwrap().is_none());
        assert_eq!(
            repo.find_with_books_by_id(1).await.unwrap(),
            Some(author(1, "One"))
        );
    }

    #[tokio::test]
    async fn test_save_updates_existing_author() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        let repo = SqliteAuthorRepository::new(pool.clone());

        repo.save(&author(1, "Old")).await.unwrap();
        repo.save(&author(1, "New")).await.unwrap();

        let name: String = sqlx::query_scalar("SELECT first_name FROM authors WHERE id = 1")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(name, "New");
    }
}
