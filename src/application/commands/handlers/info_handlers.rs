//! Info Command Handlers

use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::application::commands::SubmitContactMessage;
use crate::application::error::ApplicationError;
use crate::application::ports::{ContactMessageRecord, InfoRepositoryPort};
use crate::domain::catalog::{CatalogError, ContactEmail};

/// 留言响应
#[derive(Debug, Clone, Serialize)]
pub struct ContactMessageResponse {
    pub id: i64,
    pub email: String,
    pub message: String,
}

/// SubmitContactMessage Handler
pub struct SubmitContactMessageHandler {
    info_repo: Arc<dyn InfoRepositoryPort>,
}

impl SubmitContactMessageHandler {
    pub fn new(info_repo: Arc<dyn InfoRepositoryPort>) -> Self {
        Self { info_repo }
    }

    pub async fn handle(
        &self,
        command: SubmitContactMessage,
    ) -> Result<ContactMessageResponse, ApplicationError> {
        let email = ContactEmail::new(command.email)?;
        let message = command.message.trim().to_string();
        if message.is_empty() {
            return Err(CatalogError::EmptyMessage.into());
        }

        let record = ContactMessageRecord {
            email,
            message,
            created_at: Utc::now(),
        };
        let id = self.info_repo.save_contact_message(&record).await?;

        tracing::info!(message_id = id, email = %record.email, "Contact message received");

        Ok(ContactMessageResponse {
            id,
            email: record.email.as_str().to_string(),
            message: record.message,
        })
    }
}
