use std::str::FromStr;

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures::stream::StreamExt;
use serde::Deserialize;

use crate::application::ports::CompletionClient;
use crate::application::services::GenerationError;
use crate::domain::{ChatTurn, TurnRole};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::extract::AuthenticatedUser;
use crate::presentation::state::AppState;

use super::ErrorBody;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<TurnPayload>,
}

#[derive(Debug, Deserialize)]
pub struct TurnPayload {
    pub role: String,
    pub content: String,
}

/// One chat turn in, one streamed assistant turn out. The response body is
/// the raw token stream; persistence of the accumulated text happens behind
/// the stream, after the final chunk is forwarded.
#[tracing::instrument(skip(state, user, request), fields(user_id = %user.user_id.as_uuid()))]
pub async fn chat_handler<C>(
    State(state): State<AppState<C>>,
    user: AuthenticatedUser,
    Json(request): Json<ChatRequest>,
) -> Response
where
    C: CompletionClient + 'static,
{
    let mut turns = Vec::with_capacity(request.messages.len());
    for payload in &request.messages {
        match TurnRole::from_str(&payload.role) {
            Ok(role) => turns.push(ChatTurn::new(role, payload.content.clone())),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorBody::new(format!("Invalid role: {}", payload.role))),
                )
                    .into_response();
            }
        }
    }

    if let Some(last) = turns.last() {
        tracing::debug!(prompt = %sanitize_prompt(&last.content), "Processing chat turn");
    }

    match state.generation_service.generate(user.user_id, &turns).await {
        Ok(stream) => {
            let body = Body::from_stream(stream.map(|item| item.map(Bytes::from)));
            (
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                body,
            )
                .into_response()
        }
        Err(GenerationError::InvalidTurns(reason)) => {
            tracing::warn!(reason, "Rejected malformed chat request");
            (StatusCode::BAD_REQUEST, Json(ErrorBody::new(reason))).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Chat generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new("Internal server error")),
            )
                .into_response()
        }
    }
}
