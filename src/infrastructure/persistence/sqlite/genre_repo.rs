//! SQLite Genre Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::database::db_error;
use super::DbPool;
use crate::application::ports::{GenreRecord, GenreRepositoryPort, RepositoryError};

pub struct SqliteGenreRepository {
    pool: DbPool,
}

impl SqliteGenreRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct GenreRow {
    id: i64,
    title: String,
    description: String,
}

impl From<GenreRow> for GenreRecord {
    fn from(row: GenreRow) -> Self {
        GenreRecord {
            id: row.id,
            title: row.title,
            description: row.description,
        }
    }
}

#[async_trait]
impl GenreRepositoryPort for SqliteGenreRepository {
    async fn save(&self, genre: &GenreRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO genres (id, title, description)
            VALUES (?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description
            "#,
        )
        .bind(genre.id)
        .bind(&genre.title)
        .bind(&genre.description)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                RepositoryError::Duplicate(format!("genre '{}'", genre.title))
            }
            other => db_error(other),
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<GenreRecord>, RepositoryError> {
        let row: Option<GenreRow> =
            sqlx::query_as("SELECT id, title, description FROM genres WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(row.map(GenreRecord::from))
    }

    async fn find_all(&self) -> Result<Vec<GenreRecord>, RepositoryError> {
        let rows: Vec<GenreRow> =
            sqlx::query_as("SELECT id, title, description FROM genres ORDER BY title, id")
                .fetch_all(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(rows.into_iter().map(GenreRecord::from).collect())
    }
}
