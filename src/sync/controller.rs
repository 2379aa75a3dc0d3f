#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::future::Future;

use crate::net::gateway::Gateway;
use crate::net::types::{ApprovalRequest, Conversation, Message};
use crate::state::conversation::{ConversationState, SyncPhase};
use crate::state::store::Store;

/// Per-selection state machine over [`ConversationState`].
///
/// The controller is the only writer of the cached conversation view. Every
/// fetch it issues closes over the conversation id it was issued for, and
/// every completion re-checks that the id is still the selected one before
/// applying — a result for a conversation the user has already left is
/// discarded. That check, not request sequencing, is the correctness guard:
/// two refreshes for the same still-selected conversation may land in either
/// order, and the later completion wins wholesale.
///
/// Transient fetch failures are logged and leave the last good snapshot in
/// place; they never clear state or propagate.
pub struct SyncController<G, S> {
    gateway: G,
    state: S,
}

impl<G: Clone, S: Clone> Clone for SyncController<G, S> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            state: self.state.clone(),
        }
    }
}

impl<G, S> SyncController<G, S>
where
    G: Gateway,
    S: Store<ConversationState>,
{
    pub fn new(gateway: G, state: S) -> Self {
        Self { gateway, state }
    }

    /// Change the selection. `None` clears everything; `Some(id)` drops the
    /// previous conversation's cached data and enters `Loading`. The actual
    /// fetches are issued by [`Self::refresh_all`], which the caller spawns.
    pub fn select(&self, id: Option<i64>) {
        self.state.update(|s| {
            s.clear();
            if let Some(id) = id {
                s.selected = Some(id);
                s.phase = SyncPhase::Loading;
            }
        });
    }

    /// Initial fetch set for a freshly selected conversation: messages,
    /// metadata, and approvals, issued together. Each result is applied as it
    /// arrives, so the panel becomes interactive without waiting for the slowest
    /// fetch; the full set is always requested because partial staleness (old
    /// approvals against new messages) is worse than an extra round trip.
    pub fn refresh_all(&self, id: i64) -> impl Future<Output = ()> + 'static {
        let this = self.clone();
        async move {
            let messages = async {
                match this.gateway.list_messages(id).await {
                    Ok(messages) => this.state.update(|s| {
                        apply_messages(s, id, messages);
                    }),
                    Err(e) => leptos::logging::warn!("couldn't list messages: {e}"),
                }
            };
            let conversation = async {
                match this.gateway.get_conversation(id).await {
                    Ok(conversation) => this.state.update(|s| {
                        apply_conversation(s, id, conversation);
                    }),
                    Err(e) => leptos::logging::warn!("couldn't get conversation: {e}"),
                }
            };
            let approvals = async {
                match this.gateway.list_approval_requests(id).await {
                    Ok(approvals) => this.state.update(|s| {
                        apply_approvals(s, id, approvals);
                    }),
                    Err(e) => leptos::logging::warn!("couldn't list approval requests: {e}"),
                }
            };
            futures::join!(messages, conversation, approvals);

            // All three settled (applied or failed): the view is as loaded as
            // it is going to get for this round.
            this.state.update(|s| {
                if s.is_selected(id) && s.phase == SyncPhase::Loading {
                    s.phase = SyncPhase::Ready;
                }
            });
        }
    }

    /// Targeted refresh for `conversation-{id}-updated`: messages and metadata
    /// together, applied as one unit once both have resolved so `generating`
    /// never flips before the messages that caused it appear. Approvals are
    /// untouched by this event.
    pub fn refresh_conversation(&self, id: i64) -> impl Future<Output = ()> + 'static {
        let this = self.clone();
        async move {
            let (messages, conversation) = futures::join!(
                this.gateway.list_messages(id),
                this.gateway.get_conversation(id),
            );
            match (messages, conversation) {
                (Ok(messages), Ok(conversation)) => this.state.update(|s| {
                    apply_conversation_update(s, id, messages, conversation);
                }),
                (Err(e), _) | (_, Err(e)) => {
                    leptos::logging::warn!("couldn't refresh conversation: {e}");
                }
            }
        }
    }

    /// Targeted refresh for `conversation-{id}-approvals-updated`: replaces the
    /// cached approval list wholesale.
    pub fn refresh_approvals(&self, id: i64) -> impl Future<Output = ()> + 'static {
        let this = self.clone();
        async move {
            match this.gateway.list_approval_requests(id).await {
                Ok(approvals) => this.state.update(|s| {
                    apply_approvals(s, id, approvals);
                }),
                Err(e) => leptos::logging::warn!("couldn't refresh approval requests: {e}"),
            }
        }
    }
}

// The apply functions hold the stale-completion guard: each one refuses a
// result fetched for a conversation that is no longer selected. They return
// whether the result was applied.

fn apply_messages(s: &mut ConversationState, id: i64, messages: Vec<Message>) -> bool {
    if !s.is_selected(id) {
        return false;
    }
    s.messages = messages;
    true
}

fn apply_conversation(s: &mut ConversationState, id: i64, conversation: Conversation) -> bool {
    if !s.is_selected(id) {
        return false;
    }
    s.conversation = Some(conversation);
    true
}

fn apply_conversation_update(
    s: &mut ConversationState,
    id: i64,
    messages: Vec<Message>,
    conversation: Conversation,
) -> bool {
    if !s.is_selected(id) {
        return false;
    }
    s.messages = messages;
    s.conversation = Some(conversation);
    true
}

fn apply_approvals(s: &mut ConversationState, id: i64, approvals: Vec<ApprovalRequest>) -> bool {
    if !s.is_selected(id) {
        return false;
    }
    s.approvals = approvals;
    true
}
