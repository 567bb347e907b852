//! Catalog Record Sources
//!
//! 把 Repository 的 count/range 查询适配为 `RecordSource`

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::ports::{
    AuthorRecord, AuthorRepositoryPort, BookRecord, BookRepositoryPort, RecordSource,
    RepositoryError,
};

/// 所有已发布书籍
pub struct ReleasedBooks {
    repo: Arc<dyn BookRepositoryPort>,
}

impl ReleasedBooks {
    pub fn new(repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl RecordSource for ReleasedBooks {
    type Item = BookRecord;

    async fn count(&self) -> Result<usize, RepositoryError> {
        self.repo.count_released().await
    }

    async fn slice(&self, start: usize, end: usize) -> Result<Vec<BookRecord>, RepositoryError> {
        self.repo.find_released_range(start, end).await
    }
}

/// 某位作者的书籍
pub struct AuthorBooks {
    repo: Arc<dyn BookRepositoryPort>,
    author_id: i64,
}

impl AuthorBooks {
    pub fn new(repo: Arc<dyn BookRepositoryPort>, author_id: i64) -> Self {
        Self { repo, author_id }
    }
}

#[async_trait]
impl RecordSource for AuthorBooks {
    type Item = BookRecord;

    async fn count(&self) -> Result<usize, RepositoryError> {
        self.repo.count_by_author(self.author_id).await
    }

    async fn slice(&self, start: usize, end: usize) -> Result<Vec<BookRecord>, RepositoryError> {
        self.repo.find_by_author_range(self.author_id, start, end).await
    }
}

/// 某个分类下的已发布书籍
pub struct GenreBooks {
    repo: Arc<dyn BookRepositoryPort>,
    genre_id: i64,
}

impl GenreBooks {
    pub fn new(repo: Arc<dyn BookRepositoryPort>, genre_id: i64) -> Self {
        Self { repo, genre_id }
    }
}

#[async_trait]
impl RecordSource for GenreBooks {
    type Item = BookRecord;

    async fn count(&self) -> Result<usize, RepositoryError> {
        self.repo.count_released_by_genre(self.genre_id).await
    }

    async fn slice(&self, start: usize, end: usize) -> Result<Vec<BookRecord>, RepositoryError> {
        self.repo
            .find_released_by_genre_range(self.genre_id, start, end)
            .await
    }
}

/// 至少有一本书的作者
pub struct AuthorsWithBooks {
    repo: Arc<dyn AuthorRepositoryPort>,
}

impl AuthorsWithBooks {
    pub fn new(repo: Arc<dyn AuthorRepositoryPort>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl RecordSource for AuthorsWithBooks {
    type Item = AuthorRecord;

    async fn count(&self) -> Result<usize, RepositoryError> {
        self.repo.count_with_books().await
    }

    async fn slice(&self, start: usize, end: usize) -> Result<Vec<AuthorRecord>, RepositoryError> {
        self.repo.find_with_books_range(start, end).await
    }
}
