use super::constants::{self, CONVERSATION_TYPES, CURSOR_PAGE_LIMIT, PAGE_COUNT};
use super::error::SlackError;
use super::methods::ApiMethod;
use super::models::{
    ConversationsPage, FilesPage, HistoryPage, Identity, SearchPage, UsersPage,
};
use super::resilience::RateLimiters;
use log::{debug, trace, warn};
use reqwest::StatusCode;
use reqwest::header::RETRY_AFTER;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::Value;
use std::time::Duration;

type Params<'a> = Vec<(&'a str, String)>;

/// Slack Web API client with per-tier rate limiting
#[derive(Clone)]
pub struct SlackClient {
    base_url: String,
    http_client: reqwest::Client,
    token: String,
    rate_limiters: RateLimiters,
}

impl SlackClient {
    pub fn with_base_url(
        base_url: impl Into<String>,
        token: impl Into<String>,
        rate_limiters: RateLimiters,
    ) -> Result<Self, SlackError> {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(constants::USER_AGENT)
            .build()
            .map_err(SlackError::Client)?;

        Ok(Self {
            base_url: base_url.into(),
            http_client,
            token: token.into(),
            rate_limiters,
        })
    }

    /// Rate limiters shared by every clone of this client
    pub fn rate_limiters(&self) -> &RateLimiters {
        &self.rate_limiters
    }

    /// Call a Web API method and decode the response body into `T`.
    ///
    /// Waits on the method's tier limiter first. Parameters are sent as a
    /// form body.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: ApiMethod,
        params: &[(&str, String)],
    ) -> Result<T, SlackError> {
        let name = method.name();
        self.rate_limiters.get(method.tier()).acquire().await;

        let url = constants::method_endpoint(&self.base_url, name);
        debug!("POST {}", name);
        trace!("{} params: {:?}", name, params);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.token)
            .form(params)
            .send()
            .await
            .map_err(|source| SlackError::Request { method: name, source })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u64>().ok())
                .map(Duration::from_secs);
            warn!("{} was rate limited (Retry-After: {:?})", name, retry_after);
            return Err(SlackError::RateLimited { method: name, retry_after });
        }

        let body = response
            .text()
            .await
            .map_err(|source| SlackError::Request { method: name, source })?;

        if !status.is_success() {
            return Err(SlackError::Http {
                method: name,
                status: status.as_u16(),
                body: truncate(&body, constants::ERROR_BODY_LIMIT),
            });
        }

        let payload: Value = serde_json::from_str(&body)
            .map_err(|source| SlackError::Decode { method: name, source })?;

        // Slack reports most failures as HTTP 200 with "ok": false
        if payload.get("ok").and_then(Value::as_bool) != Some(true) {
            let error = payload
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown_error")
                .to_string();
            if error == "ratelimited" {
                return Err(SlackError::RateLimited { method: name, retry_after: None });
            }
            return Err(SlackError::Api { method: name, error });
        }

        if let Some(warning) = payload.get("warning").and_then(Value::as_str) {
            debug!("{} warning: {}", name, warning);
        }

        serde_json::from_value(payload).map_err(|source| SlackError::Decode { method: name, source })
    }

    pub async fn auth_test(&self) -> Result<Identity, SlackError> {
        self.call(ApiMethod::AuthTest, &[]).await
    }

    pub async fn conversations_list(
        &self,
        cursor: Option<&str>,
    ) -> Result<ConversationsPage, SlackError> {
        let mut params: Params = vec![
            ("types", CONVERSATION_TYPES.to_string()),
            ("exclude_archived", "false".to_string()),
            ("limit", CURSOR_PAGE_LIMIT.to_string()),
        ];
        push_cursor(&mut params, cursor);
        self.call(ApiMethod::ConversationsList, &params).await
    }

    pub async fn users_list(&self, cursor: Option<&str>) -> Result<UsersPage, SlackError> {
        let mut params: Params = vec![("limit", CURSOR_PAGE_LIMIT.to_string())];
        push_cursor(&mut params, cursor);
        self.call(ApiMethod::UsersList, &params).await
    }

    pub async fn conversations_history(
        &self,
        channel: &str,
        cursor: Option<&str>,
    ) -> Result<HistoryPage, SlackError> {
        let mut params: Params = vec![
            ("channel", channel.to_string()),
            ("limit", CURSOR_PAGE_LIMIT.to_string()),
        ];
        push_cursor(&mut params, cursor);
        self.call(ApiMethod::ConversationsHistory, &params).await
    }

    pub async fn conversations_replies(
        &self,
        channel: &str,
        thread_ts: &str,
        cursor: Option<&str>,
    ) -> Result<HistoryPage, SlackError> {
        let mut params: Params = vec![
            ("channel", channel.to_string()),
            ("ts", thread_ts.to_string()),
            ("limit", CURSOR_PAGE_LIMIT.to_string()),
        ];
        push_cursor(&mut params, cursor);
        self.call(ApiMethod::ConversationsReplies, &params).await
    }

    pub async fn search_messages(&self, query: &str, page: u32) -> Result<SearchPage, SlackError> {
        let params: Params = vec![
            ("query", query.to_string()),
            ("count", PAGE_COUNT.to_string()),
            ("page", page.to_string()),
            ("sort", "timestamp".to_string()),
        ];
        self.call(ApiMethod::SearchMessages, &params).await
    }

    pub async fn files_list(
        &self,
        user: &str,
        channel: &str,
        page: u32,
    ) -> Result<FilesPage, SlackError> {
        let params: Params = vec![
            ("user", user.to_string()),
            ("channel", channel.to_string()),
            ("count", PAGE_COUNT.to_string()),
            ("page", page.to_string()),
        ];
        self.call(ApiMethod::FilesList, &params).await
    }

    pub async fn chat_delete(&self, channel: &str, ts: &str) -> Result<(), SlackError> {
        let params: Params = vec![("channel", channel.to_string()), ("ts", ts.to_string())];
        self.call::<IgnoredAny>(ApiMethod::ChatDelete, &params).await?;
        Ok(())
    }

    pub async fn chat_update(&self, channel: &str, ts: &str, text: &str) -> Result<(), SlackError> {
        let params: Params = vec![
            ("channel", channel.to_string()),
            ("ts", ts.to_string()),
            ("text", text.to_string()),
        ];
        self.call::<IgnoredAny>(ApiMethod::ChatUpdate, &params).await?;
        Ok(())
    }

    pub async fn files_delete(&self, file_id: &str) -> Result<(), SlackError> {
        let params: Params = vec![("file", file_id.to_string())];
        self.call::<IgnoredAny>(ApiMethod::FilesDelete, &params).await?;
        Ok(())
    }
}

fn push_cursor(params: &mut Params<'_>, cursor: Option<&str>) {
    if let Some(cursor) = cursor.filter(|c| !c.is_empty()) {
        params.push(("cursor", cursor.to_string()));
    }
}

fn truncate(body: &str, limit: usize) -> String {
    match body.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_string(),
    }
}
