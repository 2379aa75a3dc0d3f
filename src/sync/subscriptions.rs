#[cfg(test)]
#[path = "subscriptions_test.rs"]
mod subscriptions_test;

use crate::net::events::{EventHub, Subscription, topics};

/// Binds push-notification listeners to the currently selected conversation.
///
/// The invariant: at any moment, exactly the listener set for the current id
/// exists, and no other. On every selection change the previous listeners are
/// dropped before new ones are bound, so a callback captured for conversation A
/// is structurally gone — not merely ignored — once B is selected. The id a
/// callback refreshes is captured at bind time, never read from shared state at
/// fire time.
///
/// Rebinding is unconditional even when the same id is re-selected;
/// subscription cost is negligible and the simple rule has no corner cases.
#[derive(Default)]
pub struct SubscriptionManager {
    active: Vec<Subscription>,
}

impl SubscriptionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Release all current listeners, then bind fresh ones for `id` (none for
    /// `None`). `on_updated` fires for `conversation-{id}-updated`,
    /// `on_approvals` for `conversation-{id}-approvals-updated`; both receive
    /// the id that was current at bind time.
    pub fn rebind(
        &mut self,
        hub: &EventHub,
        id: Option<i64>,
        on_updated: impl Fn(i64) + 'static,
        on_approvals: impl Fn(i64) + 'static,
    ) {
        // Unbind-before-bind: dropping the subscriptions unregisters them
        // before any new listener exists.
        self.active.clear();

        let Some(id) = id else {
            return;
        };

        self.active.push(
            hub.subscribe(&topics::conversation_updated(id), move |_| on_updated(id)),
        );
        self.active.push(hub.subscribe(
            &topics::conversation_approvals_updated(id),
            move |_| on_approvals(id),
        ));
    }

    /// Drop all listeners. Idempotent.
    pub fn release(&mut self) {
        self.active.clear();
    }
}
