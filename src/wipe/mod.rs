//! Wiping a user's own messages and files in one conversation
//!
//! A [`TeamSession`] is the state of one run: the authenticated identity,
//! the resolved conversation, and the content collected from it.

pub mod executor;
pub mod report;

pub use executor::{WipeItem, run_concurrent};
pub use report::{WipeFailure, WipeOutcome, WipeReport};

use crate::api::{Conversation, File, Identity, Message, SlackClient};
use crate::collect;
use crate::redact;
use crate::ui::Progress;
use anyhow::{Context, Result};
use clap::ValueEnum;
use log::info;
use serde::Deserialize;

/// What happens to collected messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WipeMode {
    /// Delete messages with chat.delete
    #[default]
    Delete,
    /// Overwrite message text with marker glyphs via chat.update
    Redact,
}

/// How own messages are found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSource {
    /// Walk the full conversation history
    #[default]
    History,
    /// Use search.messages (fewer calls, relies on the search index)
    Search,
}

/// Token and conversation of the workspace being wiped
#[derive(Debug, Clone, Default)]
pub struct Team {
    /// Channel name, `#name`, conversation ID, or `@user` for a DM
    pub channel: String,
    pub token: String,
}

impl WipeItem for Message {
    fn label(&self) -> String {
        self.ts.clone()
    }
}

impl WipeItem for File {
    fn label(&self) -> String {
        self.id.clone()
    }
}

pub struct TeamSession {
    client: SlackClient,
    pub team: Team,
    pub identity: Identity,
    pub channel: Conversation,
    /// Every message fetched from the conversation
    pub messages: Vec<Message>,
    /// Messages authored by the authenticated user
    pub user_messages: Vec<Message>,
    pub user_files: Vec<File>,
}

impl TeamSession {
    /// Authenticate and resolve the team's channel
    pub async fn connect(client: SlackClient, team: Team) -> Result<Self> {
        let identity = collect::fetch_identity(&client)
            .await
            .context("fetch user info")?;
        info!("Authenticated as {} in {}", identity.user, identity.team);

        let channel = collect::resolve_channel(&client, &team.channel)
            .await
            .with_context(|| format!("fetch channel info for channel {:?}", team.channel))?;
        info!("Resolved {:?} to {}", team.channel, channel.id);

        Ok(Self {
            client,
            team,
            identity,
            channel,
            messages: Vec::new(),
            user_messages: Vec::new(),
            user_files: Vec::new(),
        })
    }

    pub fn channel_id(&self) -> &str {
        &self.channel.id
    }

    pub fn client(&self) -> &SlackClient {
        &self.client
    }

    /// Collect the conversation's messages and keep the user's own
    pub async fn fetch_messages(&mut self, source: MessageSource, threads: bool) -> Result<()> {
        let channel_id = self.channel.id.clone();
        let messages = match source {
            MessageSource::History if threads => {
                collect::fetch_history_with_threads(&self.client, &channel_id).await
            }
            MessageSource::History => collect::fetch_history(&self.client, &channel_id).await,
            MessageSource::Search => {
                collect::search_own_messages(&self.client, &self.identity, &channel_id).await
            }
        }
        .with_context(|| format!("fetch messages for channel {:?}", self.team.channel))?;

        self.user_messages = collect::own_messages(&messages, &self.identity.user_id)
            .into_iter()
            .cloned()
            .collect();
        self.messages = messages;
        Ok(())
    }

    pub async fn fetch_files(&mut self) -> Result<()> {
        self.user_files = collect::fetch_files(&self.client, &self.identity.user_id, &self.channel.id)
            .await
            .with_context(|| format!("fetch files for channel {:?}", self.team.channel))?;
        Ok(())
    }

    /// Delete or redact every own message; failures are recorded, not fatal
    pub async fn wipe_user_messages(
        &self,
        mode: WipeMode,
        marker: char,
        concurrency: usize,
    ) -> WipeReport {
        let items = self.user_messages.clone();
        let verb = match mode {
            WipeMode::Delete => "deleting",
            WipeMode::Redact => "redacting",
        };
        let progress = Progress::start(format!("{} messages", verb), items.len());

        let client = &self.client;
        let channel = self.channel.id.as_str();
        let report = run_concurrent(items, concurrency, &progress, |message| async move {
            match mode {
                WipeMode::Delete => client
                    .chat_delete(channel, &message.ts)
                    .await
                    .map(|()| WipeOutcome::Done),
                WipeMode::Redact => {
                    if !redact::needs_redaction(&message.text, marker) {
                        return Ok(WipeOutcome::Skipped);
                    }
                    let text = redact::redact_text(&message.text, marker);
                    client
                        .chat_update(channel, &message.ts, &text)
                        .await
                        .map(|()| WipeOutcome::Done)
                }
            }
        })
        .await;

        progress.finish();
        report
    }

    pub async fn wipe_user_files(&self, concurrency: usize) -> WipeReport {
        let items = self.user_files.clone();
        let progress = Progress::start("deleting files", items.len());

        let client = &self.client;
        let report = run_concurrent(items, concurrency, &progress, |file| async move {
            client.files_delete(&file.id).await.map(|()| WipeOutcome::Done)
        })
        .await;

        progress.finish();
        report
    }
}
