mod account_service;
mod generation_service;
mod history_service;

pub use account_service::{AccountError, AccountService};
pub use generation_service::{
    GenerationError, GenerationService, GenerationStream, PAGE_SYSTEM_PROMPT,
};
pub use history_service::{HistoryError, HistoryPage, HistoryService};
