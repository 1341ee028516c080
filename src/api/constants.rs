//! API constants for the Slack Web API

/// Default Web API base URL
pub const DEFAULT_API_URL: &str = "https://slack.com/api";

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("slack-wipe/", env!("CARGO_PKG_VERSION"));

/// Conversation types searched when resolving a channel
pub const CONVERSATION_TYPES: &str = "public_channel,private_channel,mpim,im";

/// Page size for cursor-paginated list methods
pub const CURSOR_PAGE_LIMIT: u32 = 200;

/// Page size for page-numbered methods (search, files)
pub const PAGE_COUNT: u32 = 100;

/// Longest response body kept in an error message
pub const ERROR_BODY_LIMIT: usize = 200;

/// Build the endpoint URL for a Web API method
pub fn method_endpoint(base_url: &str, method: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), method)
}
