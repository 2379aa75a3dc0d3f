//! Wire types mirroring the backend's JSON models.
//!
//! Field names follow the backend's JSON tags exactly (`conversationSettingsID`,
//! `lastMessageTime`, ...). The client treats every value here as a cached
//! projection of backend truth: entities are replaced wholesale on refresh,
//! never merged field by field.

use serde::{Deserialize, Serialize};

/// Sentinel conversation id sent with the first message of a not-yet-created
/// conversation. The backend creates the conversation and the returned
/// [`Message`] carries the real id.
pub const NEW_CONVERSATION: i64 = -1;

/// A persisted thread of messages with its generation state.
///
/// `generating` is backend-owned and is the authoritative gate for user input;
/// the client never infers it locally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: i64,
    #[serde(rename = "conversationSettingsID")]
    pub conversation_settings_id: i64,
    pub title: String,
    /// RFC 3339 timestamp, carried opaquely.
    #[serde(rename = "lastMessageTime")]
    pub last_message_time: String,
    pub generating: bool,
}

/// A single message within a conversation, totally ordered by `id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    #[serde(rename = "conversationID")]
    pub conversation_id: i64,
    pub content: String,
    /// `"user"`, `"assistant"`, or the name of the tool that produced an
    /// observation message.
    pub author: String,
}

impl Message {
    pub fn is_user(&self) -> bool {
        self.author == "user"
    }
}

/// A backend-issued gate: generation will not proceed until a human approves.
/// At most one is outstanding per conversation at any time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalRequest {
    pub id: String,
    pub message: String,
}

/// Configuration attached to a conversation (or the default configuration,
/// whose sentinel id is `-1` until first saved).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSetting {
    pub id: i64,
    #[serde(rename = "systemPromptTemplate")]
    pub system_prompt_template: String,
    #[serde(rename = "toolsEnabled")]
    pub tools_enabled: Vec<String>,
}

/// A tool the backend can run, as advertised by the backend. The client never
/// hard-codes this list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableTool {
    #[serde(rename = "ID")]
    pub id: String,
    pub name: String,
}
