//! Scriptable in-memory gateway for native tests.
//!
//! Responses come from seeded fixtures and resolve immediately, except where a
//! test has armed a deferral for an operation: the next call to that operation
//! then parks until the test fires the returned sender, which is how the race
//! tests control completion order.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use futures::channel::oneshot;

use crate::net::gateway::{Gateway, GatewayError};
use crate::net::types::{
    ApprovalRequest, AvailableTool, Conversation, ConversationSetting, Message, NEW_CONVERSATION,
};

#[derive(Default)]
struct Inner {
    conversations: HashMap<i64, Conversation>,
    messages: HashMap<i64, Vec<Message>>,
    approvals: HashMap<i64, Vec<ApprovalRequest>>,
    calls: Vec<String>,
    deferred: HashMap<&'static str, VecDeque<oneshot::Receiver<()>>>,
    next_message_id: i64,
    created_conversation_id: i64,
}

#[derive(Clone)]
pub struct MockGateway {
    inner: Rc<RefCell<Inner>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                next_message_id: 1,
                created_conversation_id: 100,
                ..Inner::default()
            })),
        }
    }

    pub fn insert_conversation(&self, conversation: Conversation) {
        self.inner
            .borrow_mut()
            .conversations
            .insert(conversation.id, conversation);
    }

    pub fn set_messages(&self, conversation_id: i64, messages: Vec<Message>) {
        self.inner
            .borrow_mut()
            .messages
            .insert(conversation_id, messages);
    }

    pub fn set_approvals(&self, conversation_id: i64, approvals: Vec<ApprovalRequest>) {
        self.inner
            .borrow_mut()
            .approvals
            .insert(conversation_id, approvals);
    }

    /// Make subsequent `get_conversation` calls fail with a 404.
    pub fn remove_conversation(&self, conversation_id: i64) {
        self.inner.borrow_mut().conversations.remove(&conversation_id);
    }

    /// Id assigned when a send targets [`NEW_CONVERSATION`].
    pub fn set_created_conversation_id(&self, id: i64) {
        self.inner.borrow_mut().created_conversation_id = id;
    }

    /// Park the next call to `op` (a method name) until the returned sender
    /// fires. Deferrals queue up per operation in call order.
    pub fn defer(&self, op: &'static str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.inner
            .borrow_mut()
            .deferred
            .entry(op)
            .or_default()
            .push_back(rx);
        tx
    }

    /// Every gateway call recorded so far, e.g. `"list_messages(7)"`.
    pub fn calls(&self) -> Vec<String> {
        self.inner.borrow().calls.clone()
    }

    fn record(&self, call: String) {
        self.inner.borrow_mut().calls.push(call);
    }

    async fn gate(&self, op: &'static str) {
        let rx = self
            .inner
            .borrow_mut()
            .deferred
            .get_mut(op)
            .and_then(VecDeque::pop_front);
        if let Some(rx) = rx {
            let _ = rx.await;
        }
    }
}

impl Gateway for MockGateway {
    async fn list_messages(&self, conversation_id: i64) -> Result<Vec<Message>, GatewayError> {
        self.record(format!("list_messages({conversation_id})"));
        self.gate("list_messages").await;
        Ok(self
            .inner
            .borrow()
            .messages
            .get(&conversation_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_conversation(&self, conversation_id: i64) -> Result<Conversation, GatewayError> {
        self.record(format!("get_conversation({conversation_id})"));
        self.gate("get_conversation").await;
        self.inner
            .borrow()
            .conversations
            .get(&conversation_id)
            .cloned()
            .ok_or(GatewayError::Status(404))
    }

    async fn list_approval_requests(
        &self,
        conversation_id: i64,
    ) -> Result<Vec<ApprovalRequest>, GatewayError> {
        self.record(format!("list_approval_requests({conversation_id})"));
        self.gate("list_approval_requests").await;
        Ok(self
            .inner
            .borrow()
            .approvals
            .get(&conversation_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_conversations(&self) -> Result<Vec<Conversation>, GatewayError> {
        self.record("list_conversations()".to_owned());
        self.gate("list_conversations").await;
        let mut items: Vec<Conversation> =
            self.inner.borrow().conversations.values().cloned().collect();
        items.sort_by_key(|c| c.id);
        Ok(items)
    }

    async fn send_message(
        &self,
        conversation_id: i64,
        content: &str,
    ) -> Result<Message, GatewayError> {
        self.record(format!("send_message({conversation_id}, {content:?})"));
        self.gate("send_message").await;
        let mut inner = self.inner.borrow_mut();
        let conversation_id = if conversation_id == NEW_CONVERSATION {
            inner.created_conversation_id
        } else {
            conversation_id
        };
        let id = inner.next_message_id;
        inner.next_message_id += 1;
        let message = Message {
            id,
            conversation_id,
            content: content.to_owned(),
            author: "user".to_owned(),
        };
        inner
            .messages
            .entry(conversation_id)
            .or_default()
            .push(message.clone());
        Ok(message)
    }

    async fn rerun_from_message(
        &self,
        conversation_id: i64,
        message_id: i64,
    ) -> Result<(), GatewayError> {
        self.record(format!("rerun_from_message({conversation_id}, {message_id})"));
        self.gate("rerun_from_message").await;
        Ok(())
    }

    async fn cancel_generation(&self, conversation_id: i64) -> Result<(), GatewayError> {
        self.record(format!("cancel_generation({conversation_id})"));
        self.gate("cancel_generation").await;
        Ok(())
    }

    async fn approve(&self, conversation_id: i64, approval_id: &str) -> Result<(), GatewayError> {
        self.record(format!("approve({conversation_id}, {approval_id})"));
        self.gate("approve").await;
        Ok(())
    }

    async fn delete_conversation(&self, conversation_id: i64) -> Result<(), GatewayError> {
        self.record(format!("delete_conversation({conversation_id})"));
        self.gate("delete_conversation").await;
        self.inner.borrow_mut().conversations.remove(&conversation_id);
        Ok(())
    }

    async fn get_conversation_settings(
        &self,
        settings_id: i64,
    ) -> Result<ConversationSetting, GatewayError> {
        self.record(format!("get_conversation_settings({settings_id})"));
        Ok(ConversationSetting {
            id: settings_id,
            system_prompt_template: String::new(),
            tools_enabled: Vec::new(),
        })
    }

    async fn update_conversation_settings(
        &self,
        setting: &ConversationSetting,
    ) -> Result<ConversationSetting, GatewayError> {
        self.record(format!("update_conversation_settings({})", setting.id));
        Ok(setting.clone())
    }

    async fn get_default_conversation_settings(&self) -> Result<ConversationSetting, GatewayError> {
        self.record("get_default_conversation_settings()".to_owned());
        Ok(ConversationSetting {
            id: -1,
            system_prompt_template: String::new(),
            tools_enabled: Vec::new(),
        })
    }

    async fn set_default_conversation_settings(
        &self,
        setting: &ConversationSetting,
    ) -> Result<ConversationSetting, GatewayError> {
        self.record("set_default_conversation_settings()".to_owned());
        Ok(setting.clone())
    }

    async fn list_available_tools(&self) -> Result<Vec<AvailableTool>, GatewayError> {
        self.record("list_available_tools()".to_owned());
        Ok(Vec::new())
    }
}
