use std::sync::Arc;

use crate::application::ports::CompletionClient;
use crate::application::services::{AccountService, GenerationService, HistoryService};
use crate::infrastructure::auth::SessionKeys;

pub struct AppState<C>
where
    C: CompletionClient,
{
    pub generation_service: Arc<GenerationService<C>>,
    pub account_service: Arc<AccountService>,
    pub history_service: Arc<HistoryService>,
    pub session_keys: Arc<SessionKeys>,
}

impl<C> Clone for AppState<C>
where
    C: CompletionClient,
{
    fn clone(&self) -> Self {
        Self {
            generation_service: Arc::clone(&self.generation_service),
            account_service: Arc::clone(&self.account_service),
            history_service: Arc::clone(&self.history_service),
            session_keys: Arc::clone(&self.session_keys),
        }
    }
}
