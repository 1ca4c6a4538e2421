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
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct UserPayload {
    pub id: Uuid,
    pub email: String,
}

#[derive(Serialize)]
pub struct SignupResponse {
    pub message: String,
    pub user: UserPayload,
}

#[tracing::instrument(skip(state, request))]
pub async fn signup_handler<C>(
    State(state): State<AppState<C>>,
    Json(request): Json<SignupRequest>,
) -> Response
where
    C: CompletionClient + 'static,
{
    match state
        .account_service
        .signup(&request.email, &request.password)
        .await
    {
        Ok(user) => {
            tracing::info!(user_id = %user.id.as_uuid(), "Account created");
            (
                StatusCode::OK,
                Json(SignupResponse {
                    message: "User created successfully".to_string(),
                    user: UserPayload {
                        id: user.id.as_uuid(),
                        email: user.email,
                    },
                }),
            )
                .into_response()
        }
        Err(AccountError::MissingCredentials) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::new("Email and password are required")),
        )
            .into_response(),
        Err(AccountError::EmailTaken) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::new("User already exists")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Signup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new("Internal server error")),
            )
                .into_response()
        }
    }
}
