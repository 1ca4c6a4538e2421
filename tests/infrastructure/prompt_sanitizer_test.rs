use pagesmith::infrastructure::observability::sanitize_prompt;

#[test]
fn given_empty_prompt_then_placeholder_is_returned() {
    assert_eq!(sanitize_prompt(""), "[EMPTY]");
    assert_eq!(sanitize_prompt("   "), "[EMPTY]");
}

#[test]
fn given_short_prompt_then_it_passes_through_trimmed() {
    assert_eq!(sanitize_prompt("  navbar  "), "navbar");
}

#[test]
fn given_long_prompt_then_it_is_truncated_with_length_note() {
    let prompt = "x".repeat(250);
    let sanitized = sanitize_prompt(&prompt);

    assert!(sanitized.starts_with(&"x".repeat(100)));
    assert!(sanitized.contains("250 chars total"));
}

#[test]
fn given_multibyte_prompt_then_truncation_does_not_panic() {
    let prompt = "ü".repeat(150);
    let sanitized = sanitize_prompt(&prompt);

    assert!(sanitized.contains("150 chars total"));
}

#[test]
fn given_bearer_token_then_it_is_redacted() {
    let sanitized = sanitize_prompt("use Bearer abc123 to call the api");

    assert!(sanitized.contains("Bearer [REDACTED]"));
    assert!(!sanitized.contains("abc123"));
}

#[test]
fn given_password_pair_then_value_is_redacted() {
    let sanitized = sanitize_prompt("login with password=hunter2 please");

    assert!(sanitized.contains("password=[REDACTED]"));
    assert!(!sanitized.contains("hunter2"));
}
