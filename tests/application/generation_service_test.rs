use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;

use pagesmith::application::services::{GenerationError, GenerationService};
use pagesmith::domain::{ChatTurn, Message, MessageId, TurnRole, UserId};
use pagesmith::infrastructure::llm::MockCompletionClient;

use super::support::{FailingMidStreamClient, InMemoryMessageRepository};

fn user_turn(content: &str) -> ChatTurn {
    ChatTurn::new(TurnRole::User, content.to_string())
}

async fn wait_for_persisted_response(
    repository: &InMemoryMessageRepository,
    id: MessageId,
) -> String {
    for _ in 0..100 {
        let response = repository
            .snapshot()
            .into_iter()
            .find(|m| m.id == id)
            .map(|m| m.response)
            .unwrap_or_default();
        if !response.is_empty() {
            return response;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("response was never persisted");
}

#[tokio::test]
async fn given_valid_turns_then_row_exists_before_first_chunk_is_consumed() {
    let repository = Arc::new(InMemoryMessageRepository::new());
    let service = GenerationService::new(
        Arc::new(MockCompletionClient::with_tokens(&["<nav>", "</nav>"])),
        repository.clone(),
    );
    let user = UserId::new();

    let stream = service
        .generate(user, &[user_turn("navbar")])
        .await
        .expect("generation should start");

    // Inserted with an empty response before any token flows.
    let rows = repository.snapshot();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].prompt, "navbar");
    assert_eq!(rows[0].response, "");

    let forwarded: String = stream
        .map(|item| item.expect("stream should not error"))
        .collect()
        .await;
    assert_eq!(forwarded, "<nav></nav>");
}

#[tokio::test]
async fn given_happy_path_then_forwarded_bytes_equal_persisted_response() {
    let repository = Arc::new(InMemoryMessageRepository::new());
    let service = GenerationService::new(
        Arc::new(MockCompletionClient::with_tokens(&[
            "<html>", "<main>", "hero", "</main>", "</html>",
        ])),
        repository.clone(),
    );
    let user = UserId::new();

    let stream = service
        .generate(user, &[user_turn("hero section")])
        .await
        .unwrap();
    let message_id = repository.snapshot()[0].id;

    let forwarded: String = stream.map(|item| item.unwrap()).collect().await;
    let persisted = wait_for_persisted_response(&repository, message_id).await;

    assert_eq!(forwarded, persisted);
    assert_eq!(persisted, "<html><main>hero</main></html>");
}

#[tokio::test]
async fn given_identical_prompt_within_window_then_no_second_row_but_fresh_stream() {
    let repository = Arc::new(InMemoryMessageRepository::new());
    let service = GenerationService::new(
        Arc::new(MockCompletionClient::with_tokens(&["page"])),
        repository.clone(),
    );
    let user = UserId::new();

    // Just-finished generation for the same prompt.
    let mut recent = Message::new(user, "navbar with dark mode".to_string());
    recent.response = "<html></html>".to_string();
    repository.seed(recent.clone());

    let stream = service
        .generate(user, &[user_turn("navbar with dark mode")])
        .await
        .unwrap();
    let forwarded: String = stream.map(|item| item.unwrap()).collect().await;

    assert_eq!(forwarded, "page");

    // The near-duplicate row stands alone and keeps its original response.
    tokio::time::sleep(Duration::from_millis(50)).await;
    let rows = repository.snapshot();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].response, "<html></html>");
}

#[tokio::test]
async fn given_identical_prompt_outside_window_then_second_row_is_created() {
    let repository = Arc::new(InMemoryMessageRepository::new());
    let service = GenerationService::new(
        Arc::new(MockCompletionClient::with_tokens(&["page"])),
        repository.clone(),
    );
    let user = UserId::new();

    let mut old = Message::new(user, "landing page".to_string());
    old.created_at = chrono::Utc::now() - chrono::Duration::milliseconds(10_000);
    repository.seed(old);

    let stream = service
        .generate(user, &[user_turn("landing page")])
        .await
        .unwrap();
    let _: String = stream.map(|item| item.unwrap()).collect().await;

    assert_eq!(repository.snapshot().len(), 2);
}

#[tokio::test]
async fn given_other_users_recent_identical_prompt_then_row_is_still_created() {
    let repository = Arc::new(InMemoryMessageRepository::new());
    let service = GenerationService::new(
        Arc::new(MockCompletionClient::with_tokens(&["page"])),
        repository.clone(),
    );

    repository.seed(Message::new(UserId::new(), "pricing table".to_string()));

    let stream = service
        .generate(UserId::new(), &[user_turn("pricing table")])
        .await
        .unwrap();
    let _: String = stream.map(|item| item.unwrap()).collect().await;

    assert_eq!(repository.snapshot().len(), 2);
}

#[tokio::test]
async fn given_provider_error_midstream_then_partial_text_is_not_persisted() {
    let repository = Arc::new(InMemoryMessageRepository::new());
    let service = GenerationService::new(
        Arc::new(FailingMidStreamClient {
            tokens: vec!["<html>".to_string(), "<body>".to_string()],
        }),
        repository.clone(),
    );
    let user = UserId::new();

    let stream = service.generate(user, &[user_turn("navbar")]).await.unwrap();
    let items: Vec<_> = stream.collect().await;

    assert_eq!(items.len(), 3);
    assert!(items[0].is_ok());
    assert!(items[1].is_ok());
    assert!(items[2].is_err());

    // The pre-created row keeps its empty response.
    tokio::time::sleep(Duration::from_millis(50)).await;
    let rows = repository.snapshot();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].response, "");
}

#[tokio::test]
async fn given_empty_turn_list_then_validation_error_and_no_rows() {
    let repository = Arc::new(InMemoryMessageRepository::new());
    let service = GenerationService::new(
        Arc::new(MockCompletionClient::with_tokens(&["hi"])),
        repository.clone(),
    );

    let result = service.generate(UserId::new(), &[]).await;

    assert!(matches!(result, Err(GenerationError::InvalidTurns(_))));
    assert!(repository.snapshot().is_empty());
}

#[tokio::test]
async fn given_assistant_final_turn_then_validation_error_and_no_rows() {
    let repository = Arc::new(InMemoryMessageRepository::new());
    let service = GenerationService::new(
        Arc::new(MockCompletionClient::with_tokens(&["hi"])),
        repository.clone(),
    );

    let turns = [
        user_turn("navbar"),
        ChatTurn::new(TurnRole::Assistant, "<html></html>".to_string()),
    ];
    let result = service.generate(UserId::new(), &turns).await;

    assert!(matches!(result, Err(GenerationError::InvalidTurns(_))));
    assert!(repository.snapshot().is_empty());
}

#[tokio::test]
async fn given_multi_turn_history_then_only_last_user_content_becomes_prompt() {
    let repository = Arc::new(InMemoryMessageRepository::new());
    let service = GenerationService::new(
        Arc::new(MockCompletionClient::with_tokens(&["ok"])),
        repository.clone(),
    );

    let turns = [
        user_turn("navbar"),
        ChatTurn::new(TurnRole::Assistant, "<nav></nav>".to_string()),
        user_turn("make it sticky"),
    ];
    let stream = service.generate(UserId::new(), &turns).await.unwrap();
    let _: String = stream.map(|item| item.unwrap()).collect().await;

    let rows = repository.snapshot();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].prompt, "make it sticky");
}
