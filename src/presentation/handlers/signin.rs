use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::ports::CompletionClient;
use crate::application::services::AccountError;
use crate::presentation::state::AppState;

use super::ErrorBody;

#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct SigninResponse {
    pub token: String,
    pub user: SigninUserPayload,
}

#[derive(Serialize)]
pub struct SigninUserPayload {
    pub id: Uuid,
    pub email: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn signin_handler<C>(
    State(state): State<AppState<C>>,
    Json(request): Json<SigninRequest>,
) -> Response
where
    C: CompletionClient + 'static,
{
    match state
        .account_service
        .authenticate(&request.email, &request.password)
        .await
    {
        Ok(user) => match state.session_keys.issue(&user) {
            Ok(token) => (
                StatusCode::OK,
                Json(SigninResponse {
                    token,
                    user: SigninUserPayload {
                        id: user.id.as_uuid(),
                        email: user.email,
                    },
                }),
            )
                .into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Session token creation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody::new("Internal server error")),
                )
                    .into_response()
            }
        },
        Err(AccountError::InvalidCredentials) => (
            StatusCode::UNAUTHORIZED,
            Json(ErrorBody::new("Invalid email or password")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Signin failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new("Internal server error")),
            )
                .into_response()
        }
    }
}
