//! Typed views of the Slack Web API payloads used by this tool
//!
//! Only the fields the tool reads are modelled; everything else in a payload
//! is ignored during deserialization.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

/// Result of `auth.test`
#[derive(Debug, Clone, Deserialize)]
pub struct Identity {
    pub user: String,
    pub user_id: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub team_id: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationKind {
    PublicChannel,
    PrivateChannel,
    DirectMessage,
    GroupDirectMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Conversation {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_channel: bool,
    #[serde(default)]
    pub is_group: bool,
    #[serde(default)]
    pub is_im: bool,
    #[serde(default)]
    pub is_mpim: bool,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub is_archived: bool,
    /// Peer user of a direct message
    #[serde(default)]
    pub user: Option<String>,
}

impl Conversation {
    pub fn kind(&self) -> ConversationKind {
        if self.is_im {
            ConversationKind::DirectMessage
        } else if self.is_mpim {
            ConversationKind::GroupDirectMessage
        } else if self.is_group || self.is_private {
            ConversationKind::PrivateChannel
        } else {
            ConversationKind::PublicChannel
        }
    }

    /// Human-readable name: `#name` for channels, the raw name or ID otherwise
    pub fn display_name(&self) -> String {
        match (&self.name, self.kind()) {
            (Some(name), ConversationKind::PublicChannel | ConversationKind::PrivateChannel) => {
                format!("#{}", name)
            }
            (Some(name), _) => name.clone(),
            (None, _) => self.id.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub real_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub real_name: Option<String>,
    #[serde(default)]
    pub profile: UserProfile,
    #[serde(default)]
    pub deleted: bool,
}

impl User {
    /// Whether `handle` names this user (handle, real name or display name)
    pub fn matches(&self, handle: &str) -> bool {
        let handle = handle.trim_start_matches('@');
        let candidates = [
            Some(self.name.as_str()),
            self.real_name.as_deref(),
            self.profile.display_name.as_deref(),
            self.profile.real_name.as_deref(),
        ];
        candidates
            .into_iter()
            .flatten()
            .filter(|candidate| !candidate.is_empty())
            .any(|candidate| candidate.eq_ignore_ascii_case(handle))
    }
}

/// Channel reference attached to search matches
#[derive(Debug, Clone, Deserialize)]
pub struct MessageChannel {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub ts: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub thread_ts: Option<String>,
    #[serde(default)]
    pub reply_count: u32,
    #[serde(default)]
    pub channel: Option<MessageChannel>,
}

impl Message {
    /// Parent of a thread with at least one reply
    pub fn has_replies(&self) -> bool {
        self.reply_count > 0 && self.thread_ts.as_deref() == Some(self.ts.as_str())
    }

    /// Posting time, parsed from the `ts` identifier
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_ts(&self.ts)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct File {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub size: u64,
}

impl File {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.created, 0).single()
    }
}

/// Page-numbered pagination block (`search.messages`, `files.list`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub pages: u32,
}

/// Cursor pagination block
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseMetadata {
    #[serde(default)]
    pub next_cursor: String,
}

/// Next cursor of a response, if there is another page
pub fn next_cursor(metadata: &Option<ResponseMetadata>) -> Option<String> {
    metadata
        .as_ref()
        .map(|meta| meta.next_cursor.trim())
        .filter(|cursor| !cursor.is_empty())
        .map(ToOwned::to_owned)
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversationsPage {
    #[serde(default)]
    pub channels: Vec<Conversation>,
    #[serde(default)]
    pub response_metadata: Option<ResponseMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsersPage {
    #[serde(default)]
    pub members: Vec<User>,
    #[serde(default)]
    pub response_metadata: Option<ResponseMetadata>,
}

/// Page of `conversations.history` or `conversations.replies`
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryPage {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub response_metadata: Option<ResponseMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchMatches {
    #[serde(default)]
    pub matches: Vec<Message>,
    #[serde(default)]
    pub paging: Option<Paging>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub messages: SearchMatches,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilesPage {
    #[serde(default)]
    pub files: Vec<File>,
    #[serde(default)]
    pub paging: Option<Paging>,
}

/// Parse a message `ts` ("1700000000.000100") into a UTC time
pub fn parse_ts(ts: &str) -> Option<DateTime<Utc>> {
    let (secs, micros) = ts.split_once('.').unwrap_or((ts, "0"));
    let secs: i64 = secs.parse().ok()?;
    let micros: u32 = micros.parse().ok()?;
    Utc.timestamp_opt(secs, micros.saturating_mul(1000)).single()
}
