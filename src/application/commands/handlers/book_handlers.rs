//! Book Command Handlers

use serde::Serialize;
use std::sync::Arc;

use crate::application::commands::RateBook;
use crate::application::error::ApplicationError;
use crate::application::ports::{BookRepositoryPort, RatingRecord};
use crate::domain::catalog::{average_rating, Rating};

/// 评分响应
#[derive(Debug, Clone, Serialize)]
pub struct RateBookResponse {
    pub book_id: i64,
    pub rating: u8,
    pub average_rating: String,
}

/// RateBook Handler
pub struct RateBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl RateBookHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(&self, command: RateBook) -> Result<RateBookResponse, ApplicationError> {
        let rating = Rating::new(command.rating)?;

        self.book_repo
            .find_released_by_id(command.book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", command.book_id))?;

        self.book_repo
            .upsert_rating(&RatingRecord {
                book_id: command.book_id,
                user_id: command.user_id,
                rating,
            })
            .await?;

        let ratings = self.book_repo.find_ratings(&[command.book_id]).await?;
        let average = ratings
            .get(&command.book_id)
            .map(|r| average_rating(r))
            .unwrap_or_else(|| average_rating(&[]));

        tracing::info!(
            book_id = command.book_id,
            user_id = command.user_id,
            rating = rating.value(),
            average = %average,
            "Book rated"
        );

        Ok(RateBookResponse {
            book_id: command.book_id,
            rating: rating.value(),
            average_rating: average,
        })
    }
}
