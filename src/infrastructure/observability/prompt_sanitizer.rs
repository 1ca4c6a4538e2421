const MAX_VISIBLE_CHARS: usize = 100;

/// Sanitizes prompt text for safe logging: trims, truncates on a character
/// boundary, and redacts credential-looking substrings.
pub fn sanitize_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let visible: String = trimmed.chars().take(MAX_VISIBLE_CHARS).collect();
    let sanitized = if visible.len() < trimmed.len() {
        format!("{}... ({} chars total)", visible, trimmed.chars().count())
    } else {
        visible
    };

    redact_secrets(&sanitized)
}

fn redact_secrets(text: &str) -> String {
    let markers = [
        ("Bearer ", "Bearer [REDACTED]"),
        ("api_key=", "api_key=[REDACTED]"),
        ("password=", "password=[REDACTED]"),
        ("secret=", "secret=[REDACTED]"),
        ("token=", "token=[REDACTED]"),
    ];

    let mut result = text.to_string();
    for (marker, replacement) in markers {
        if let Some(start) = result.find(marker) {
            let value_start = start + marker.len();
            let value_end = result[value_start..]
                .find(|c: char| c.is_whitespace() || c == '&' || c == '"' || c == '\'')
                .map(|i| value_start + i)
                .unwrap_or(result.len());
            result = format!("{}{}{}", &result[..start], replacement, &result[value_end..]);
        }
    }

    result
}
