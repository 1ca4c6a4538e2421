use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Message, MessageId, UserId};

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn insert(&self, message: &Message) -> Result<(), RepositoryError>;

    /// Overwrite the `response` of the row created when generation began.
    /// Keyed by the id captured at insert time, so concurrent requests never
    /// touch each other's rows.
    async fn update_response(
        &self,
        id: MessageId,
        response: &str,
    ) -> Result<(), RepositoryError>;

    /// Most recent row for `(owner, prompt)`, or `None`. Ordered by creation
    /// time descending; on a timestamp tie whichever row the store returns
    /// first wins.
    async fn find_latest_by_prompt(
        &self,
        owner: UserId,
        prompt: &str,
    ) -> Result<Option<Message>, RepositoryError>;

    /// One page of the owner's rows, newest first, optionally filtered by a
    /// substring match on `prompt`.
    async fn list_page(
        &self,
        owner: UserId,
        search: Option<&str>,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Message>, RepositoryError>;

    async fn count(&self, owner: UserId, search: Option<&str>) -> Result<u64, RepositoryError>;

    /// Returns `true` when a row was deleted, `false` when no row with that
    /// id belongs to `owner`.
    async fn delete_by_id_and_owner(
        &self,
        id: MessageId,
        owner: UserId,
    ) -> Result<bool, RepositoryError>;
}
