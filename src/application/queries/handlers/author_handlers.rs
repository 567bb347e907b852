//! Author Query Handlers

use std::sync::Arc;

use super::book_handlers::rate_page;
use super::{AuthorResponse, BookResponse};
use crate::application::catalog::CatalogService;
use crate::application::error::ApplicationError;
use crate::application::ports::AuthorRepositoryPort;
use crate::application::queries::{GetAuthor, ListAuthorBooks, ListAuthors};
use crate::domain::PageResult;

/// ListAuthors Handler
pub struct ListAuthorsHandler {
    catalog: Arc<CatalogService>,
}

impl ListAuthorsHandler {
    pub fn new(catalog: Arc<CatalogService>) -> Self {
        Self { catalog }
    }

    pub async fn handle(
        &self,
        query: ListAuthors,
    ) -> Result<PageResult<AuthorResponse>, ApplicationError> {
        let page = self.catalog.list_authors(&query.page).await?;
        Ok(page.map(AuthorResponse::from))
    }
}

/// GetAuthor Handler
pub struct GetAuthorHandler {
    author_repo: Arc<dyn AuthorRepositoryPort>,
}

impl GetAuthorHandler {
    pub fn new(author_repo: Arc<dyn AuthorRepositoryPort>) -> Self {
        Self { author_repo }
    }

    pub async fn handle(&self, query: GetAuthor) -> Result<AuthorResponse, ApplicationError> {
        let author = self
            .author_repo
            .find_with_books_by_id(query.author_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Author", query.author_id))?;

        Ok(AuthorResponse::from(author))
    }
}

/// ListAuthorBooks Handler
pub struct ListAuthorBooksHandler {
    catalog: Arc<CatalogService>,
}

impl ListAuthorBooksHandler {
    pub fn new(catalog: Arc<CatalogService>) -> Self {
        Self { catalog }
    }

    pub async fn handle(
        &self,
        query: ListAuthorBooks,
    ) -> Result<PageResult<BookResponse>, ApplicationError> {
        let page = self
            .catalog
            .list_author_books(query.author_id, &query.page)
            .await?;

        tracing::debug!(
            author_id = query.author_id,
            books = page.items.len(),
            "Author books listed"
        );

        rate_page(&self.catalog, page).await
    }
}
