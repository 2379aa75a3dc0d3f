#[cfg(test)]
#[path = "conversation_test.rs"]
mod conversation_test;

use crate::net::types::{ApprovalRequest, Conversation, Message};

/// Where the cached view stands for the current selection.
///
/// These states describe the client's cache, not the backend's generation
/// pipeline: `Ready` means the initial fetch set has settled, whether or not
/// the backend is generating.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SyncPhase {
    /// No conversation selected.
    #[default]
    Empty,
    /// Initial fetch set in flight.
    Loading,
    /// Messages, metadata, and approvals have all been requested and settled.
    Ready,
}

/// Cached projection of the currently selected conversation.
///
/// Owned (written) exclusively by the sync controller; everything else only
/// reads it. Each refresh replaces a field wholesale from an authoritative
/// fetch — there is no field-level merging.
#[derive(Clone, Debug, Default)]
pub struct ConversationState {
    pub selected: Option<i64>,
    pub phase: SyncPhase,
    pub conversation: Option<Conversation>,
    pub messages: Vec<Message>,
    pub approvals: Vec<ApprovalRequest>,
}

impl ConversationState {
    /// The backend-owned gate for user input. False while nothing is selected
    /// or metadata hasn't arrived yet.
    pub fn generating(&self) -> bool {
        self.conversation.as_ref().is_some_and(|c| c.generating)
    }

    pub fn is_selected(&self, conversation_id: i64) -> bool {
        self.selected == Some(conversation_id)
    }

    /// Reset to `Empty`, dropping all cached data.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
