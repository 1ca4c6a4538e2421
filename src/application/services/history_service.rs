use std::sync::Arc;

use crate::application::ports::{MessageRepository, RepositoryError};
use crate::domain::{Message, MessageId, UserId};

/// Paginated, optionally filtered access to a user's persisted generations.
pub struct HistoryService {
    message_repository: Arc<dyn MessageRepository>,
}

#[derive(Debug)]
pub struct HistoryPage {
    pub messages: Vec<Message>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub has_more: bool,
}

impl HistoryService {
    pub fn new(message_repository: Arc<dyn MessageRepository>) -> Self {
        Self { message_repository }
    }

    /// Newest-first page of the owner's rows. `search` is a substring filter
    /// on the prompt only; blank filters are ignored.
    #[tracing::instrument(skip(self), fields(owner = %owner.as_uuid()))]
    pub async fn list(
        &self,
        owner: UserId,
        search: Option<&str>,
        page: u32,
        limit: u32,
    ) -> Result<HistoryPage, HistoryError> {
        let page = page.max(1);
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        let offset = (page - 1).saturating_mul(limit);

        let messages = self
            .message_repository
            .list_page(owner, search, limit, offset)
            .await?;
        let total = self.message_repository.count(owner, search).await?;

        Ok(HistoryPage {
            messages,
            page,
            limit,
            total,
            has_more: u64::from(offset + limit) < total,
        })
    }

    /// Owner-scoped delete. Returns `false` when the row does not exist or
    /// belongs to someone else.
    #[tracing::instrument(skip(self), fields(owner = %owner.as_uuid(), id = %id.as_uuid()))]
    pub async fn delete(&self, owner: UserId, id: MessageId) -> Result<bool, HistoryError> {
        Ok(self
            .message_repository
            .delete_by_id_and_owner(id, owner)
            .await?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
}
