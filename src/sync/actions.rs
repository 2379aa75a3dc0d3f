#[cfg(test)]
#[path = "actions_test.rs"]
mod actions_test;

use crate::net::gateway::Gateway;
use crate::net::types::NEW_CONVERSATION;
use crate::state::conversation::ConversationState;
use crate::state::store::Store;

/// Validates and issues user actions against the gateway.
///
/// The dispatcher never mutates the cached conversation view: it relies on the
/// push events every successful action triggers, so the authoritative ids and
/// ordering are never guessed client-side. Invalid preconditions (empty text,
/// sending while generating, approving a request that is no longer cached) are
/// silent no-ops, not errors.
pub struct ActionDispatcher<G, S> {
    gateway: G,
    state: S,
}

impl<G: Clone, S: Clone> Clone for ActionDispatcher<G, S> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            state: self.state.clone(),
        }
    }
}

impl<G, S> ActionDispatcher<G, S>
where
    G: Gateway,
    S: Store<ConversationState>,
{
    pub fn new(gateway: G, state: S) -> Self {
        Self { gateway, state }
    }

    /// Send a user message. `None` targets a not-yet-created conversation (the
    /// backend creates one and returns its id).
    ///
    /// Returns the authoritative conversation id on success so the selection
    /// layer can adopt a newly created conversation, or `None` when the input
    /// was rejected locally or the call failed. No message is inserted
    /// locally; the subsequent `conversation-{id}-updated` push refreshes the
    /// list.
    pub async fn send_message(&self, conversation_id: Option<i64>, text: &str) -> Option<i64> {
        if !self.state.with(|s| can_send(s, conversation_id, text)) {
            return None;
        }

        let target = conversation_id.unwrap_or(NEW_CONVERSATION);
        match self.gateway.send_message(target, text).await {
            Ok(message) => Some(message.conversation_id),
            Err(e) => {
                leptos::logging::warn!("couldn't send message: {e}");
                None
            }
        }
    }

    /// Discard `message_id` and everything after it and regenerate.
    ///
    /// Deliberately not gated on `generating`: rerunning is how a user
    /// interrupts a bad run, so its availability is a UI decision. The client
    /// applies no local truncation; the push event carries the new state.
    pub async fn rerun_from_message(&self, conversation_id: i64, message_id: i64) {
        if let Err(e) = self
            .gateway
            .rerun_from_message(conversation_id, message_id)
            .await
        {
            leptos::logging::warn!("couldn't rerun from message: {e}");
        }
    }

    /// Ask the backend to stop generating. Always issued; if generation already
    /// finished the backend treats it as a no-op.
    pub async fn cancel_generation(&self, conversation_id: i64) {
        if let Err(e) = self.gateway.cancel_generation(conversation_id).await {
            leptos::logging::warn!("couldn't cancel generation: {e}");
        }
    }

    /// Approve the outstanding tool-call request. Only issued while that
    /// request id is the cached outstanding one; the cache is cleared by the
    /// subsequent approvals push, never locally in anticipation.
    pub async fn approve(&self, conversation_id: i64, approval_id: &str) {
        let pending = self
            .state
            .with(|s| approval_pending(s, conversation_id, approval_id));
        if !pending {
            return;
        }
        if let Err(e) = self.gateway.approve(conversation_id, approval_id).await {
            leptos::logging::warn!("couldn't approve request: {e}");
        }
    }

    /// Delete a conversation. Returns whether the backend accepted; the caller
    /// deselects on success (the list itself refreshes via
    /// `conversations-updated`).
    pub async fn delete_conversation(&self, conversation_id: i64) -> bool {
        match self.gateway.delete_conversation(conversation_id).await {
            Ok(()) => true,
            Err(e) => {
                leptos::logging::warn!("couldn't delete conversation: {e}");
                false
            }
        }
    }
}

/// The send gate: empty input never leaves the client, and a conversation the
/// cache shows as generating accepts no new input. A `None` target (fresh
/// conversation) has no generation state to gate on.
fn can_send(s: &ConversationState, conversation_id: Option<i64>, text: &str) -> bool {
    if text.trim().is_empty() {
        return false;
    }
    match conversation_id {
        Some(id) => !(s.is_selected(id) && s.generating()),
        None => true,
    }
}

fn approval_pending(s: &ConversationState, conversation_id: i64, approval_id: &str) -> bool {
    s.is_selected(conversation_id) && s.approvals.iter().any(|r| r.id == approval_id)
}
