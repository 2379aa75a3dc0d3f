//! Push-notification topics and the in-process event hub.
//!
//! The backend publishes named topics with no payload semantics beyond
//! "something changed" — the one exception is [`topics::ASYNC_ERROR`], which
//! carries an error string. Listeners therefore treat delivery as a trigger to
//! refetch, never as a data source.
//!
//! [`EventHub`] fans incoming topics out to subscribers. A subscription is a
//! value: dropping it unsubscribes, unconditionally and idempotently. That
//! makes "discard the listener entirely" the natural way to retire handlers
//! bound to a previously selected conversation.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Topic names consumed by the client.
pub mod topics {
    /// Conversation list changed (created, deleted, retitled).
    pub const CONVERSATIONS_UPDATED: &str = "conversations-updated";

    /// Global, conversation-agnostic backend error; payload is the message.
    pub const ASYNC_ERROR: &str = "async-error";

    /// Messages or metadata of one conversation changed.
    pub fn conversation_updated(conversation_id: i64) -> String {
        format!("conversation-{conversation_id}-updated")
    }

    /// Outstanding approval requests of one conversation changed.
    pub fn conversation_approvals_updated(conversation_id: i64) -> String {
        format!("conversation-{conversation_id}-approvals-updated")
    }
}

type Callback = Rc<dyn Fn(Option<&str>)>;

struct Listener {
    id: u64,
    callback: Callback,
}

#[derive(Default)]
struct HubInner {
    next_id: u64,
    listeners: HashMap<String, Vec<Listener>>,
}

/// Single-threaded topic fan-out. Cloning yields another handle to the same
/// hub.
#[derive(Clone, Default)]
pub struct EventHub {
    inner: Rc<RefCell<HubInner>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for `topic`. The returned [`Subscription`] keeps
    /// the listener alive; dropping it unsubscribes.
    #[must_use = "dropping the subscription immediately unsubscribes it"]
    pub fn subscribe(&self, topic: &str, callback: impl Fn(Option<&str>) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        inner
            .listeners
            .entry(topic.to_owned())
            .or_default()
            .push(Listener { id, callback: Rc::new(callback) });
        Subscription {
            hub: self.clone(),
            topic: topic.to_owned(),
            id,
        }
    }

    /// Delivers `data` to every listener currently registered for `topic`.
    ///
    /// Listeners may subscribe or unsubscribe during delivery: the listener set
    /// is snapshotted up front, and each entry is re-checked against the live
    /// registry immediately before it runs, so a handler removed by an earlier
    /// handler in the same delivery never fires.
    pub fn emit(&self, topic: &str, data: Option<&str>) {
        let snapshot: Vec<(u64, Callback)> = self
            .inner
            .borrow()
            .listeners
            .get(topic)
            .map(|listeners| {
                listeners
                    .iter()
                    .map(|l| (l.id, Rc::clone(&l.callback)))
                    .collect()
            })
            .unwrap_or_default();

        for (id, callback) in snapshot {
            let still_registered = self
                .inner
                .borrow()
                .listeners
                .get(topic)
                .is_some_and(|listeners| listeners.iter().any(|l| l.id == id));
            if still_registered {
                callback(data);
            }
        }
    }

    fn unsubscribe(&self, topic: &str, id: u64) {
        let mut inner = self.inner.borrow_mut();
        if let Some(listeners) = inner.listeners.get_mut(topic) {
            listeners.retain(|l| l.id != id);
            if listeners.is_empty() {
                inner.listeners.remove(topic);
            }
        }
    }

    #[cfg(test)]
    fn listener_count(&self, topic: &str) -> usize {
        self.inner
            .borrow()
            .listeners
            .get(topic)
            .map_or(0, Vec::len)
    }
}

/// Handle to a registered listener. Dropping it removes the listener.
pub struct Subscription {
    hub: EventHub,
    topic: String,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.hub.unsubscribe(&self.topic, self.id);
    }
}
