//! Playground and protected pages
//!
//! A submitted key rides in a short-lived cookie from the playground form to
//! the protected page, which validates it exactly once and clears it.

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::{GateOutcome, GateState};

/// Cookie carrying the pending candidate key
pub const PENDING_API_KEY_COOKIE: &str = "dandi-pending-api-key";

pub const PLAYGROUND_PATH: &str = "/playground";
pub const PROTECTED_PATH: &str = "/protected";

#[derive(Deserialize)]
pub struct PlaygroundForm {
    #[serde(default, rename = "apiKey")]
    pub api_key: String,
}

/// GET /playground
pub async fn playground_page() -> Html<String> {
    render_page(
        "API Playground",
        r#"<h2>Validate API Key</h2>
<p>Enter your API key to validate and access the protected area.</p>
<form method="post" action="/playground">
  <label for="apiKey">API Key</label>
  <input id="apiKey" name="apiKey" type="password" placeholder="Enter your API key" required>
  <button type="submit">Submit</button>
</form>"#,
    )
}

/// POST /playground
pub async fn submit_playground(
    State(state): State<AppState>,
    Form(form): Form<PlaygroundForm>,
) -> Response {
    match GateState::default().submit(&form.api_key) {
        Ok(pending) => {
            let candidate = pending.candidate().unwrap_or_default();
            let cookie = pending_cookie(candidate, state.pending_ttl_secs);

            ([(header::SET_COOKIE, cookie)], Redirect::to(PROTECTED_PATH)).into_response()
        }
        Err(_) => Redirect::to(PLAYGROUND_PATH).into_response(),
    }
}

/// GET /protected
pub async fn protected_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let pending = read_pending_candidate(&headers)
        .and_then(|candidate| GateState::default().submit(&candidate).ok());

    let Some(pending) = pending else {
        debug!("No pending API key, redirecting to playground");
        return Ok((
            [(header::SET_COOKIE, cleared_cookie())],
            Redirect::to(PLAYGROUND_PATH),
        )
            .into_response());
    };

    let result = match pending.candidate() {
        Some(candidate) => state.api_key_service.validate(candidate).await,
        None => Ok(false),
    };

    if let Err(e) = &result {
        warn!("API key validation failed, treating as invalid: {}", e);
    }

    let outcome = pending
        .resolve(result)?
        .outcome()
        .unwrap_or(GateOutcome::Invalid);

    Ok((
        [(header::SET_COOKIE, cleared_cookie())],
        render_outcome(outcome),
    )
        .into_response())
}

fn render_outcome(outcome: GateOutcome) -> Html<String> {
    let class = if outcome.is_valid() { "success" } else { "danger" };

    render_page(
        "Protected",
        &format!(
            r#"<p class="toast {}" role="status">{}</p>
<p>This is the protected area. Access is granted after a valid API key is verified.</p>"#,
            class,
            outcome.message()
        ),
    )
}

fn render_page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{title}</title></head>
<body>
<h1>{title}</h1>
{body}
</body>
</html>"#
    ))
}

fn pending_cookie(candidate: &str, ttl_secs: u64) -> String {
    format!(
        "{}={}; Max-Age={}; Path=/; HttpOnly; SameSite=Strict",
        PENDING_API_KEY_COOKIE,
        hex::encode(candidate),
        ttl_secs
    )
}

fn cleared_cookie() -> String {
    format!(
        "{}=; Max-Age=0; Path=/; HttpOnly; SameSite=Strict",
        PENDING_API_KEY_COOKIE
    )
}

/// Decode the pending candidate from the Cookie headers, if present and well formed
fn read_pending_candidate(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == PENDING_API_KEY_COOKIE)
        .and_then(|(_, value)| hex::decode(value).ok())
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .filter(|candidate| !candidate.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_pending_cookie_attributes() {
        let cookie = pending_cookie("dnd-abc", 60);

        assert!(cookie.starts_with("dandi-pending-api-key=646e642d616263;"));
        assert!(cookie.contains("Max-Age=60"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
    }

    #[test]
    fn test_read_pending_candidate() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; dandi-pending-api-key=646e642d616263"),
        );

        assert_eq!(read_pending_candidate(&headers).as_deref(), Some("dnd-abc"));
    }

    #[test]
    fn test_read_pending_candidate_rejects_garbage() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("dandi-pending-api-key=not-hex"),
        );
        assert!(read_pending_candidate(&headers).is_none());

        headers.insert(header::COOKIE, HeaderValue::from_static("dandi-pending-api-key="));
        assert!(read_pending_candidate(&headers).is_none());

        assert!(read_pending_candidate(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_cleared_cookie_expires() {
        assert!(cleared_cookie().contains("Max-Age=0"));
    }
}
