use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::application::ports::CompletionClient;
use crate::domain::UserId;
use crate::presentation::state::AppState;

/// Identity extracted from a `Bearer` session token. Handlers that take this
/// extractor reject unauthenticated requests with 401 before any store or
/// provider access.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
}

impl<C> FromRequestParts<AppState<C>> for AuthenticatedUser
where
    C: CompletionClient + 'static,
{
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<C>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(unauthorized)?;

        let claims = state.session_keys.verify(token).map_err(|_| unauthorized())?;

        Ok(AuthenticatedUser {
            user_id: claims.user_id(),
            email: claims.email,
        })
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Unauthorized" })),
    )
        .into_response()
}
