//! Credential Extraction
//!
//! Pulls session credentials out of request headers: named cookies and
//! `Authorization: Bearer` tokens.

use axum::http::{HeaderMap, header};

/// Extract a cookie value from headers
///
/// Every `Cookie` header is searched; the first matching name wins.
/// Empty values are treated as absent.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;

            if key.trim() == name {
                Some(value.trim().trim_matches('"').to_string())
            } else {
                None
            }
        })
        .filter(|value| !value.is_empty())
}

/// Extract a bearer token from the `Authorization` header
///
/// The scheme is matched case-insensitively.
pub fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}
