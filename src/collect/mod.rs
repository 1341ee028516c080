//! Pagination loops that gather a user's own content from one conversation

use crate::api::models::next_cursor;
use crate::api::{Conversation, File, Identity, Message, SlackClient, SlackError, User};
use log::{debug, info};
use std::collections::HashSet;
use thiserror::Error;

/// Message subtypes the author cannot remove with `chat.delete`
const UNDELETABLE_SUBTYPES: &[&str] = &["channel_join", "channel_leave", "bot_message", "tombstone"];

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("channel not found: {0:?}")]
    ChannelNotFound(String),

    #[error("user not found: {0:?}")]
    UserNotFound(String),

    #[error("no direct message conversation with {0:?}")]
    DirectMessageNotFound(String),

    #[error(transparent)]
    Api(#[from] SlackError),
}

pub async fn fetch_identity(client: &SlackClient) -> Result<Identity, SlackError> {
    let identity = client.auth_test().await?;
    debug!("Authenticated as {} ({})", identity.user, identity.user_id);
    Ok(identity)
}

/// List every conversation visible to the token
pub async fn fetch_conversations(client: &SlackClient) -> Result<Vec<Conversation>, SlackError> {
    let mut conversations = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = client.conversations_list(cursor.as_deref()).await?;
        conversations.extend(page.channels);

        cursor = next_cursor(&page.response_metadata);
        if cursor.is_none() {
            break;
        }
    }

    debug!("Fetched {} conversations", conversations.len());
    Ok(conversations)
}

pub async fn fetch_users(client: &SlackClient) -> Result<Vec<User>, SlackError> {
    let mut users = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = client.users_list(cursor.as_deref()).await?;
        users.extend(page.members);

        cursor = next_cursor(&page.response_metadata);
        if cursor.is_none() {
            break;
        }
    }

    debug!("Fetched {} users", users.len());
    Ok(users)
}

/// Resolve a channel name, `#name`, conversation ID, or `@user` to a conversation.
///
/// `@user` resolves to the direct message conversation with that user.
pub async fn resolve_channel(
    client: &SlackClient,
    query: &str,
) -> Result<Conversation, ResolveError> {
    let query = query.trim();
    let conversations = fetch_conversations(client).await?;

    if let Some(handle) = query.strip_prefix('@') {
        let users = fetch_users(client).await?;
        let user = users
            .iter()
            .find(|user| !user.deleted && user.matches(handle))
            .or_else(|| users.iter().find(|user| user.id == handle))
            .ok_or_else(|| ResolveError::UserNotFound(query.to_string()))?;

        return conversations
            .into_iter()
            .find(|c| c.is_im && c.user.as_deref() == Some(user.id.as_str()))
            .ok_or_else(|| ResolveError::DirectMessageNotFound(query.to_string()));
    }

    find_conversation(conversations, query)
        .ok_or_else(|| ResolveError::ChannelNotFound(query.to_string()))
}

/// Match by ID first, then by name (a leading `#` is ignored)
pub fn find_conversation(conversations: Vec<Conversation>, query: &str) -> Option<Conversation> {
    let name = query.trim_start_matches('#');
    let mut by_name = None;
    for conversation in conversations {
        if conversation.id == query {
            return Some(conversation);
        }
        if by_name.is_none() && conversation.name.as_deref() == Some(name) {
            by_name = Some(conversation);
        }
    }
    by_name
}

/// Every top-level message in the channel
pub async fn fetch_history(client: &SlackClient, channel: &str) -> Result<Vec<Message>, SlackError> {
    let mut messages = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = client.conversations_history(channel, cursor.as_deref()).await?;
        messages.extend(page.messages);
        debug!("Fetched {} messages so far from {}", messages.len(), channel);

        cursor = next_cursor(&page.response_metadata);
        if cursor.is_none() {
            break;
        }
    }

    Ok(messages)
}

/// Replies of one thread, without the parent message
pub async fn fetch_replies(
    client: &SlackClient,
    channel: &str,
    thread_ts: &str,
) -> Result<Vec<Message>, SlackError> {
    let mut replies = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = client
            .conversations_replies(channel, thread_ts, cursor.as_deref())
            .await?;
        replies.extend(page.messages.into_iter().filter(|m| m.ts != thread_ts));

        cursor = next_cursor(&page.response_metadata);
        if cursor.is_none() {
            break;
        }
    }

    Ok(replies)
}

/// Channel history plus the replies of every thread in it, deduplicated by `ts`
pub async fn fetch_history_with_threads(
    client: &SlackClient,
    channel: &str,
) -> Result<Vec<Message>, SlackError> {
    let history = fetch_history(client, channel).await?;
    let threads: Vec<String> = history
        .iter()
        .filter(|m| m.has_replies())
        .map(|m| m.ts.clone())
        .collect();
    info!("Fetching replies of {} threads", threads.len());

    let mut seen: HashSet<String> = history.iter().map(|m| m.ts.clone()).collect();
    let mut messages = history;
    for thread_ts in threads {
        for reply in fetch_replies(client, channel, &thread_ts).await? {
            // Replies also sent to the channel appear in both listings
            if seen.insert(reply.ts.clone()) {
                messages.push(reply);
            }
        }
    }

    Ok(messages)
}

/// Search query selecting a user's messages in one conversation
pub fn search_query(channel_id: &str, user_id: &str) -> String {
    format!("in:<#{}> from:<@{}>", channel_id, user_id)
}

/// Own messages in the channel via `search.messages`.
///
/// Search results are not confined to the requested conversation in every
/// workspace, so matches from other channels, or without one, are dropped.
pub async fn search_own_messages(
    client: &SlackClient,
    identity: &Identity,
    channel_id: &str,
) -> Result<Vec<Message>, SlackError> {
    let query = search_query(channel_id, &identity.user_id);
    let mut messages = Vec::new();
    let mut page = 1;
    let mut pages = 1;

    while page <= pages {
        let result = client.search_messages(&query, page).await?;
        if let Some(paging) = &result.messages.paging {
            pages = paging.pages;
        }
        messages.extend(
            result
                .messages
                .matches
                .into_iter()
                .filter(|m| m.channel.as_ref().is_some_and(|c| c.id == channel_id)),
        );
        page += 1;
    }

    debug!("Search returned {} own messages in {}", messages.len(), channel_id);
    Ok(messages)
}

/// Files shared by `user_id` in the channel; files without an owner are dropped
pub async fn fetch_files(
    client: &SlackClient,
    user_id: &str,
    channel_id: &str,
) -> Result<Vec<File>, SlackError> {
    let mut files = Vec::new();
    let mut page = 1;
    let mut pages = 1;

    while page <= pages {
        let result = client.files_list(user_id, channel_id, page).await?;
        if let Some(paging) = &result.paging {
            pages = paging.pages;
        }
        files.extend(
            result
                .files
                .into_iter()
                .filter(|f| f.user.as_deref() == Some(user_id)),
        );
        page += 1;
    }

    Ok(files)
}

/// Messages authored by `user_id` that the author is able to remove
pub fn own_messages<'a>(messages: &'a [Message], user_id: &str) -> Vec<&'a Message> {
    messages
        .iter()
        .filter(|m| m.user.as_deref() == Some(user_id))
        .filter(|m| {
            m.subtype
                .as_deref()
                .map_or(true, |subtype| !UNDELETABLE_SUBTYPES.contains(&subtype))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(ts: &str, user: &str, subtype: Option<&str>) -> Message {
        serde_json::from_value(json!({
            "ts": ts,
            "user": user,
            "text": "hello",
            "subtype": subtype,
        }))
        .unwrap()
    }

    fn conversation(id: &str, name: &str) -> Conversation {
        serde_json::from_value(json!({"id": id, "name": name, "is_channel": true})).unwrap()
    }

    #[test]
    fn test_own_messages_filters_author_and_subtype() {
        let messages = vec![
            message("1.0", "U1", None),
            message("2.0", "U2", None),
            message("3.0", "U1", Some("channel_join")),
            message("4.0", "U1", Some("thread_broadcast")),
        ];

        let own: Vec<&str> = own_messages(&messages, "U1").iter().map(|m| m.ts.as_str()).collect();
        assert_eq!(own, vec!["1.0", "4.0"]);
    }

    #[test]
    fn test_find_conversation_by_id_and_name() {
        let conversations = vec![conversation("C1", "general"), conversation("C2", "random")];

        assert_eq!(find_conversation(conversations.clone(), "C2").unwrap().id, "C2");
        assert_eq!(find_conversation(conversations.clone(), "general").unwrap().id, "C1");
        assert_eq!(find_conversation(conversations.clone(), "#random").unwrap().id, "C2");
        assert!(find_conversation(conversations, "missing").is_none());
    }

    #[test]
    fn test_find_conversation_prefers_id_match() {
        // A channel literally named like another channel's ID
        let conversations = vec![conversation("C1", "C2"), conversation("C2", "random")];
        assert_eq!(find_conversation(conversations, "C2").unwrap().id, "C2");
    }

    #[test]
    fn test_search_query() {
        assert_eq!(search_query("C123", "U456"), "in:<#C123> from:<@U456>");
    }

    #[test]
    fn test_resolve_error_message() {
        let error = ResolveError::ChannelNotFound("nope".to_string());
        assert_eq!(error.to_string(), "channel not found: \"nope\"");
    }
}
