use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{MessageRepository, RepositoryError};
use crate::domain::{Message, MessageId, UserId};

pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct MessageRow {
    id: Uuid,
    user_id: Uuid,
    prompt: String,
    response: String,
    created_at: DateTime<Utc>,
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Message {
            id: MessageId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            prompt: row.prompt,
            response: row.response,
            created_at: row.created_at,
        }
    }
}

fn like_pattern(search: Option<&str>) -> Option<String> {
    search.map(|s| format!("%{}%", s))
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self, message), fields(message_id = %message.id.as_uuid(), user_id = %message.user_id.as_uuid()))]
    async fn insert(&self, message: &Message) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO messages (id, user_id, prompt, response, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(message.id.as_uuid())
        .bind(message.user_id.as_uuid())
        .bind(&message.prompt)
        .bind(&message.response)
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self, response), fields(message_id = %id.as_uuid(), response_len = response.len()))]
    async fn update_response(&self, id: MessageId, response: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET response = $1
            WHERE id = $2
            "#,
        )
        .bind(response)
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "message {}",
                id.as_uuid()
            )));
        }

        Ok(())
    }

    #[instrument(skip(self, prompt), fields(owner = %owner.as_uuid()))]
    async fn find_latest_by_prompt(
        &self,
        owner: UserId,
        prompt: &str,
    ) -> Result<Option<Message>, RepositoryError> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, user_id, prompt, response, created_at
            FROM messages
            WHERE user_id = $1 AND prompt = $2
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(owner.as_uuid())
        .bind(prompt)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(row.map(Message::from))
    }

    #[instrument(skip(self), fields(owner = %owner.as_uuid(), limit, offset))]
    async fn list_page(
        &self,
        owner: UserId,
        search: Option<&str>,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Message>, RepositoryError> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, user_id, prompt, response, created_at
            FROM messages
            WHERE user_id = $1 AND ($2::text IS NULL OR prompt LIKE $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(owner.as_uuid())
        .bind(like_pattern(search))
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(rows.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self), fields(owner = %owner.as_uuid()))]
    async fn count(&self, owner: UserId, search: Option<&str>) -> Result<u64, RepositoryError> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM messages
            WHERE user_id = $1 AND ($2::text IS NULL OR prompt LIKE $2)
            "#,
        )
        .bind(owner.as_uuid())
        .bind(like_pattern(search))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(total as u64)
    }

    #[instrument(skip(self), fields(message_id = %id.as_uuid(), owner = %owner.as_uuid()))]
    async fn delete_by_id_and_owner(
        &self,
        id: MessageId,
        owner: UserId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM messages
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(owner.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
