use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::ports::CompletionClient;
use crate::domain::{Message, MessageId};
use crate::presentation::extract::AuthenticatedUser;
use crate::presentation::state::AppState;

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Serialize)]
pub struct MessagePayload {
    pub id: Uuid,
    pub prompt: String,
    pub response: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<Message> for MessagePayload {
    fn from(message: Message) -> Self {
        Self {
            id: message.id.as_uuid(),
            prompt: message.prompt,
            response: message.response,
            created_at: message.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct PaginationPayload {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

#[derive(Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub messages: Vec<MessagePayload>,
    pub pagination: PaginationPayload,
}

#[tracing::instrument(skip(state, user, params), fields(user_id = %user.user_id.as_uuid()))]
pub async fn list_messages_handler<C>(
    State(state): State<AppState<C>>,
    user: AuthenticatedUser,
    Query(params): Query<ListParams>,
) -> Response
where
    C: CompletionClient + 'static,
{
    let page = params.page.unwrap_or(DEFAULT_PAGE);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);

    match state
        .history_service
        .list(user.user_id, params.search.as_deref(), page, limit)
        .await
    {
        Ok(history) => {
            let response = ListResponse {
                success: true,
                messages: history.messages.into_iter().map(MessagePayload::from).collect(),
                pagination: PaginationPayload {
                    page: history.page,
                    limit: history.limit,
                    total: history.total,
                    has_more: history.has_more,
                },
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "History listing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FailureResponse::new("Internal server error")),
            )
                .into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub id: Uuid,
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
pub struct FailureResponse {
    pub success: bool,
    pub error: String,
}

impl FailureResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[tracing::instrument(skip(state, user), fields(user_id = %user.user_id.as_uuid(), message_id = %params.id))]
pub async fn delete_message_handler<C>(
    State(state): State<AppState<C>>,
    user: AuthenticatedUser,
    Query(params): Query<DeleteParams>,
) -> Response
where
    C: CompletionClient + 'static,
{
    match state
        .history_service
        .delete(user.user_id, MessageId::from_uuid(params.id))
        .await
    {
        Ok(true) => (
            StatusCode::OK,
            Json(DeleteResponse {
                success: true,
                message: "Message deleted successfully".to_string(),
            }),
        )
            .into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(FailureResponse::new("Message not found")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Message deletion failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FailureResponse::new("Internal server error")),
            )
                .into_response()
        }
    }
}
