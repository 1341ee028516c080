use std::time::Duration;
use thiserror::Error;

/// Errors returned by the Slack Web API client
#[derive(Debug, Error)]
pub enum SlackError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("{method}: request failed: {source}")]
    Request {
        method: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method}: HTTP {status}: {body}")]
    Http {
        method: &'static str,
        status: u16,
        body: String,
    },

    #[error("{method}: rate limited{}", retry_after_suffix(.retry_after))]
    RateLimited {
        method: &'static str,
        retry_after: Option<Duration>,
    },

    #[error("{method}: {error}")]
    Api { method: &'static str, error: String },

    #[error("{method}: failed to decode response: {source}")]
    Decode {
        method: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

fn retry_after_suffix(retry_after: &Option<Duration>) -> String {
    match retry_after {
        Some(delay) => format!(" (retry after {}s)", delay.as_secs()),
        None => String::new(),
    }
}

impl SlackError {
    /// Slack's error code for `"ok": false` responses (e.g. `cant_delete_message`)
    pub fn api_error_code(&self) -> Option<&str> {
        match self {
            SlackError::Api { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, SlackError::RateLimited { .. })
    }

    /// Errors caused by the token rather than the request
    pub fn is_auth_error(&self) -> bool {
        match self {
            SlackError::Api { error, .. } => matches!(
                error.as_str(),
                "not_authed" | "invalid_auth" | "account_inactive" | "token_revoked" | "token_expired"
            ),
            SlackError::Http { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }
}
