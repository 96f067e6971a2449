//! Request header helpers

use axum::http::{HeaderMap, header};

const BEARER_PREFIX: &str = "bearer ";

/// Raw `Authorization` header value, or `""` when absent or not valid UTF-8.
pub fn authorization(headers: &HeaderMap) -> &str {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// Extract a bearer credential from a raw header value.
///
/// Returns `None` when nothing but whitespace was supplied. Otherwise the
/// value is trimmed, a case-insensitive `"bearer "` prefix (exactly seven
/// bytes, single ASCII space) is removed if present, and the rest is trimmed
/// again. Any other separator, such as a tab after the scheme, leaves the
/// prefix in place and the whole string is returned as the credential.
pub fn parse_bearer(raw: &str) -> Option<&str> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    match value.get(..BEARER_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(BEARER_PREFIX) => {
            Some(value[BEARER_PREFIX.len()..].trim())
        }
        _ => Some(value),
    }
}
