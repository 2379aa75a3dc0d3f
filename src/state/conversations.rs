#[cfg(test)]
#[path = "conversations_test.rs"]
mod conversations_test;

use crate::net::types::Conversation;

/// Sidebar state: the conversation list, refreshed wholesale on
/// `conversations-updated`.
#[derive(Clone, Debug, Default)]
pub struct ConversationListState {
    pub items: Vec<Conversation>,
    pub loading: bool,
}
