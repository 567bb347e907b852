//! SQLite Info Repository - 公告与联系留言

use async_trait::async_trait;
use sqlx::FromRow;

use super::database::db_error;
use super::DbPool;
use crate::application::ports::{
    AnnouncementRecord, ContactMessageRecord, InfoRepositoryPort, RepositoryError,
};

pub struct SqliteInfoRepository {
    pool: DbPool,
}

impl SqliteInfoRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct AnnouncementRow {
    id: i64,
    title: String,
    content: String,
}

#[async_trait]
impl InfoRepositoryPort for SqliteInfoRepository {
    async fn save_announcement(
        &self,
        announcement: &AnnouncementRecord,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO announcements (id, title, content)
            VALUES (?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                content = excluded.content
            "#,
        )
        .bind(announcement.id)
        .bind(&announcement.title)
        .bind(&announcement.content)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn find_latest_announcement(&self) -> Result<Option<AnnouncementRecord>, RepositoryError> {
        let row: Option<AnnouncementRow> = sqlx::query_as(
            "SELECT id, title, content FROM announcements ORDER BY id DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(|r| AnnouncementRecord {
            id: r.id,
            title: r.title,
            content: r.content,
        }))
    }

    async fn save_contact_message(
        &self,
        message: &ContactMessageRecord,
    ) -> Result<i64, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO contact_messages (email, message, created_at) VALUES (?, ?, ?)",
        )
        .bind(message.email.as_str())
        .bind(&message.message)
        .bind(message.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(result.last_insert_rowid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::ContactEmail;
    use crate::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};
    use chrono::Utc;

    async fn repo() -> SqliteInfoRepository {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteInfoRepository::new(pool)
    }

    #[tokio::test]
    async fn test_latest_announcement() {
        let repo = repo().await;
        assert!(repo.find_latest_announcement().await.unwrap().is_none());

        for (id, title) in [(2, "Second"), (1, "First")] {
            repo.save_announcement(&AnnouncementRecord {
                id,
                title: title.to_string(),
                content: String::new(),
            })
            .await
            .unwrap();
        }

        let latest = repo.find_latest_announcement().await.unwrap().unwrap();
        assert_eq!(latest.title, "Second");
    }

    #[tokio::test]
    async fn test_contact_message_ids_increase() {
        let repo = repo().await;
        let message = ContactMessageRecord {
            email: ContactEmail::new("reader@example.com").unwrap(),
            message: "Hello".to_string(),
            created_at: Utc::now(),
        };

        let first = repo.save_contact_message(&message).await.unwrap();
        let second = repo.save_contact_message(&message).await.unwrap();
        assert!(second > first);
    }
}
