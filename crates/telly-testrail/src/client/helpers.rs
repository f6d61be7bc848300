//! Pure helpers: URL building and error body parsing (no HTTP, no status logic).

/// Build the full URL for an API v2 endpoint.
///
/// TestRail routes everything through `index.php` with the API path in the
/// query string: `{base}/index.php?/api/v2/{endpoint}`.
pub(crate) fn api_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/index.php?/api/v2/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// Extract the error message from a TestRail error body.
///
/// Expected format: `{"error": "..."}`.
/// Falls back to the (truncated) raw body, then to `fallback`.
pub(crate) fn parse_error_body(body: &str, fallback: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = json.get("error").and_then(|v| v.as_str()) {
            return message.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}
