//! Catalogue of the Web API methods this tool calls

use super::resilience::Tier;

/// A Slack Web API method together with its published rate-limit tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiMethod {
    AuthTest,
    ConversationsList,
    UsersList,
    ConversationsHistory,
    ConversationsReplies,
    SearchMessages,
    FilesList,
    ChatDelete,
    ChatUpdate,
    FilesDelete,
}

impl ApiMethod {
    /// Method name as it appears in the endpoint path
    pub fn name(self) -> &'static str {
        match self {
            ApiMethod::AuthTest => "auth.test",
            ApiMethod::ConversationsList => "conversations.list",
            ApiMethod::UsersList => "users.list",
            ApiMethod::ConversationsHistory => "conversations.history",
            ApiMethod::ConversationsReplies => "conversations.replies",
            ApiMethod::SearchMessages => "search.messages",
            ApiMethod::FilesList => "files.list",
            ApiMethod::ChatDelete => "chat.delete",
            ApiMethod::ChatUpdate => "chat.update",
            ApiMethod::FilesDelete => "files.delete",
        }
    }

    /// Rate-limit tier that gates this method.
    ///
    /// `auth.test` is in Slack's "special" class; it is limited like tier 4.
    pub fn tier(self) -> Tier {
        match self {
            ApiMethod::AuthTest => Tier::Tier4,
            ApiMethod::ConversationsList | ApiMethod::UsersList | ApiMethod::SearchMessages => {
                Tier::Tier2
            }
            ApiMethod::ConversationsHistory
            | ApiMethod::ConversationsReplies
            | ApiMethod::FilesList
            | ApiMethod::ChatDelete
            | ApiMethod::ChatUpdate
            | ApiMethod::FilesDelete => Tier::Tier3,
        }
    }
}

impl std::fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
