//! Info Query Handlers

use serde::Serialize;
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{AnnouncementRecord, InfoRepositoryPort};
use crate::application::queries::GetLatestAnnouncement;

/// 公告响应
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnouncementResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
}

impl From<AnnouncementRecord> for AnnouncementResponse {
    fn from(record: AnnouncementRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            content: record.content,
        }
    }
}

/// GetLatestAnnouncement Handler
pub struct GetLatestAnnouncementHandler {
    info_repo: Arc<dyn InfoRepositoryPort>,
}

impl GetLatestAnnouncementHandler {
    pub fn new(info_repo: Arc<dyn InfoRepositoryPort>) -> Self {
        Self { info_repo }
    }

    pub async fn handle(
        &self,
        _query: GetLatestAnnouncement,
    ) -> Result<AnnouncementResponse, ApplicationError> {
        let announcement = self
            .info_repo
            .find_latest_announcement()
            .await?
            .ok_or_else(|| ApplicationError::NoneAvailable("announcement"))?;

        Ok(AnnouncementResponse::from(announcement))
    }
}
