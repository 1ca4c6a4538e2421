use std::pin::Pin;
use std::sync::Arc;

use chrono::{Duration, Utc};
use futures::stream::{Stream, StreamExt};

use crate::application::ports::{
    CompletionClient, CompletionError, MessageRepository, RepositoryError,
};
use crate::domain::{ChatTurn, Message, TurnRole, UserId};

/// Identical prompts from the same user inside this window are treated as a
/// retry of an in-flight generation: a fresh completion is still produced,
/// but no second row is persisted.
const DEDUP_WINDOW_MS: i64 = 5000;

/// Style guide handed to the completion provider as the system instruction.
pub const PAGE_SYSTEM_PROMPT: &str = r#"You are an expert frontend developer specializing in creating clean, semantic, and well-structured HTML and CSS code.

GUIDELINES:
1. Always use semantic HTML5 elements (header, nav, main, section, article, aside, footer)
2. Follow BEM methodology for CSS class naming
3. Write mobile-first responsive CSS
4. Use CSS Grid and Flexbox for layouts
5. Include proper accessibility attributes (alt, aria-labels, etc.)
6. Use meaningful class names and IDs
7. Structure code with proper indentation
8. Add comments for complex sections
9. Follow modern CSS best practices
10. Ensure cross-browser compatibility

OUTPUT FORMAT:
Provide your response in this exact format:

```html
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Your Title</title>
    <style>
        /* ALL YOUR CSS STYLES GO HERE */
        /* Include all CSS including reset, variables, utility classes, component styles, and media queries */
    </style>
</head>
<body>
    <!-- ALL YOUR HTML STRUCTURE GOES HERE -->
    <!-- Include complete HTML with all sections, navigation, content, and footer -->
</body>
</html>
```

Then provide a brief explanation of the key features and structure of the code you generated. The explanation should focus on the overall design approach, layout structure, and key features, NOT the CSS details.

IMPORTANT: Always wrap your HTML code in ```html code blocks exactly as shown above.
"#;

pub type GenerationStream =
    Pin<Box<dyn Stream<Item = Result<String, CompletionError>> + Send + 'static>>;

/// Relays one chat turn to the completion provider, teeing the token stream
/// into the caller and an in-memory accumulator, and persisting the
/// accumulated response against a row created before the first token flows.
pub struct GenerationService<C>
where
    C: CompletionClient,
{
    completion_client: Arc<C>,
    message_repository: Arc<dyn MessageRepository>,
}

impl<C> GenerationService<C>
where
    C: CompletionClient + 'static,
{
    pub fn new(completion_client: Arc<C>, message_repository: Arc<dyn MessageRepository>) -> Self {
        Self {
            completion_client,
            message_repository,
        }
    }

    /// Validate the turn sequence, apply the de-duplication window, open the
    /// provider stream, and return the relay stream. The message row for a
    /// non-duplicate call is inserted before this method returns, so it
    /// exists before any token is forwarded.
    #[tracing::instrument(skip(self, turns), fields(user_id = %user_id.as_uuid(), turns = turns.len()))]
    pub async fn generate(
        &self,
        user_id: UserId,
        turns: &[ChatTurn],
    ) -> Result<GenerationStream, GenerationError> {
        let prompt = validate_turns(turns)?;

        let persist_target = match self
            .message_repository
            .find_latest_by_prompt(user_id, &prompt)
            .await?
        {
            Some(recent)
                if Utc::now().signed_duration_since(recent.created_at)
                    < Duration::milliseconds(DEDUP_WINDOW_MS) =>
            {
                tracing::debug!(
                    recent_id = %recent.id.as_uuid(),
                    "Duplicate prompt within window, suppressing persistence"
                );
                None
            }
            _ => {
                let message = Message::new(user_id, prompt.clone());
                self.message_repository.insert(&message).await?;
                Some(message.id)
            }
        };

        let token_stream = self
            .completion_client
            .complete_stream(PAGE_SYSTEM_PROMPT, &prompt)
            .await
            .map_err(GenerationError::Completion)?;

        let repository = Arc::clone(&self.message_repository);
        let relay = async_stream::stream! {
            let mut accumulated = String::new();
            let mut tokens = token_stream;

            while let Some(item) = tokens.next().await {
                match item {
                    Ok(token) => {
                        accumulated.push_str(&token);
                        yield Ok(token);
                    }
                    Err(e) => {
                        // Partial text is discarded; the pre-created row
                        // keeps its empty response.
                        tracing::warn!(
                            error = %e,
                            accumulated_len = accumulated.len(),
                            "Provider stream failed mid-generation"
                        );
                        yield Err(e);
                        return;
                    }
                }
            }

            if let Some(message_id) = persist_target {
                // Fire-and-forget: the response has already been fully
                // forwarded, so a persistence failure is logged, never
                // surfaced, never retried.
                tokio::spawn(async move {
                    if let Err(e) = repository
                        .update_response(message_id, &accumulated)
                        .await
                    {
                        tracing::warn!(
                            error = %e,
                            message_id = %message_id.as_uuid(),
                            "Failed to persist generated response"
                        );
                    }
                });
            }
        };

        Ok(Box::pin(relay))
    }
}

fn validate_turns(turns: &[ChatTurn]) -> Result<String, GenerationError> {
    let last = turns
        .last()
        .ok_or(GenerationError::InvalidTurns("messages are required"))?;

    if last.role != TurnRole::User {
        return Err(GenerationError::InvalidTurns(
            "last message must be from user",
        ));
    }

    if last.content.trim().is_empty() {
        return Err(GenerationError::InvalidTurns("last message is empty"));
    }

    Ok(last.content.clone())
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("invalid turns: {0}")]
    InvalidTurns(&'static str),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
    #[error("completion: {0}")]
    Completion(CompletionError),
}
