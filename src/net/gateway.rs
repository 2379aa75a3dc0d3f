//! Request/response boundary to the backend.
//!
//! The synchronization core is written against the [`Gateway`] trait so it can
//! run natively under test with a scripted gateway; [`HttpGateway`] is the real
//! browser implementation over the backend's `/api` endpoints.
//!
//! ERROR HANDLING
//! ==============
//! Gateway failures are returned as [`GatewayError`] values, never panics. The
//! sync layer treats them as transient: it logs and keeps the last good
//! snapshot rather than clearing state.

use crate::net::types::{ApprovalRequest, AvailableTool, Conversation, ConversationSetting, Message};

/// Failure of a single gateway call.
#[derive(Clone, Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server returned status {0}")]
    Status(u16),
    #[error("couldn't decode response: {0}")]
    Decode(String),
}

/// Backend operations the client consumes.
///
/// Implementations are cheaply cloneable handles; the futures they return are
/// `!Send` and run on the single-threaded event loop.
#[allow(async_fn_in_trait)]
pub trait Gateway: Clone + 'static {
    async fn list_messages(&self, conversation_id: i64) -> Result<Vec<Message>, GatewayError>;

    async fn get_conversation(&self, conversation_id: i64) -> Result<Conversation, GatewayError>;

    async fn list_approval_requests(
        &self,
        conversation_id: i64,
    ) -> Result<Vec<ApprovalRequest>, GatewayError>;

    async fn list_conversations(&self) -> Result<Vec<Conversation>, GatewayError>;

    /// Sends a user message. Passing [`crate::net::types::NEW_CONVERSATION`]
    /// asks the backend to create a conversation; the returned message carries
    /// the authoritative conversation id either way.
    async fn send_message(
        &self,
        conversation_id: i64,
        content: &str,
    ) -> Result<Message, GatewayError>;

    /// Discards `message_id` and everything after it, then regenerates.
    async fn rerun_from_message(
        &self,
        conversation_id: i64,
        message_id: i64,
    ) -> Result<(), GatewayError>;

    async fn cancel_generation(&self, conversation_id: i64) -> Result<(), GatewayError>;

    async fn approve(&self, conversation_id: i64, approval_id: &str) -> Result<(), GatewayError>;

    async fn delete_conversation(&self, conversation_id: i64) -> Result<(), GatewayError>;

    async fn get_conversation_settings(
        &self,
        settings_id: i64,
    ) -> Result<ConversationSetting, GatewayError>;

    async fn update_conversation_settings(
        &self,
        setting: &ConversationSetting,
    ) -> Result<ConversationSetting, GatewayError>;

    async fn get_default_conversation_settings(&self) -> Result<ConversationSetting, GatewayError>;

    async fn set_default_conversation_settings(
        &self,
        setting: &ConversationSetting,
    ) -> Result<ConversationSetting, GatewayError>;

    async fn list_available_tools(&self) -> Result<Vec<AvailableTool>, GatewayError>;
}

/// HTTP gateway over the backend's `/api` endpoints.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpGateway;

#[cfg(feature = "hydrate")]
impl HttpGateway {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "hydrate")]
async fn get_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, GatewayError> {
    let resp = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| GatewayError::Transport(e.to_string()))?;
    if !resp.ok() {
        return Err(GatewayError::Status(resp.status()));
    }
    resp.json::<T>()
        .await
        .map_err(|e| GatewayError::Decode(e.to_string()))
}

#[cfg(feature = "hydrate")]
async fn post_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
    url: &str,
    body: &B,
) -> Result<T, GatewayError> {
    let resp = gloo_net::http::Request::post(url)
        .json(body)
        .map_err(|e| GatewayError::Transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| GatewayError::Transport(e.to_string()))?;
    if !resp.ok() {
        return Err(GatewayError::Status(resp.status()));
    }
    resp.json::<T>()
        .await
        .map_err(|e| GatewayError::Decode(e.to_string()))
}

#[cfg(feature = "hydrate")]
async fn post_empty<B: serde::Serialize>(url: &str, body: &B) -> Result<(), GatewayError> {
    let resp = gloo_net::http::Request::post(url)
        .json(body)
        .map_err(|e| GatewayError::Transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| GatewayError::Transport(e.to_string()))?;
    if !resp.ok() {
        return Err(GatewayError::Status(resp.status()));
    }
    Ok(())
}

#[cfg(feature = "hydrate")]
impl Gateway for HttpGateway {
    async fn list_messages(&self, conversation_id: i64) -> Result<Vec<Message>, GatewayError> {
        get_json(&format!("/api/conversations/{conversation_id}/messages")).await
    }

    async fn get_conversation(&self, conversation_id: i64) -> Result<Conversation, GatewayError> {
        get_json(&format!("/api/conversations/{conversation_id}")).await
    }

    async fn list_approval_requests(
        &self,
        conversation_id: i64,
    ) -> Result<Vec<ApprovalRequest>, GatewayError> {
        get_json(&format!("/api/conversations/{conversation_id}/approvals")).await
    }

    async fn list_conversations(&self) -> Result<Vec<Conversation>, GatewayError> {
        get_json("/api/conversations").await
    }

    async fn send_message(
        &self,
        conversation_id: i64,
        content: &str,
    ) -> Result<Message, GatewayError> {
        post_json(
            &format!("/api/conversations/{conversation_id}/messages"),
            &serde_json::json!({ "content": content }),
        )
        .await
    }

    async fn rerun_from_message(
        &self,
        conversation_id: i64,
        message_id: i64,
    ) -> Result<(), GatewayError> {
        post_empty(
            &format!("/api/conversations/{conversation_id}/rerun"),
            &serde_json::json!({ "messageID": message_id }),
        )
        .await
    }

    async fn cancel_generation(&self, conversation_id: i64) -> Result<(), GatewayError> {
        post_empty(
            &format!("/api/conversations/{conversation_id}/cancel"),
            &serde_json::json!({}),
        )
        .await
    }

    async fn approve(&self, conversation_id: i64, approval_id: &str) -> Result<(), GatewayError> {
        post_empty(
            &format!("/api/conversations/{conversation_id}/approvals/{approval_id}/approve"),
            &serde_json::json!({}),
        )
        .await
    }

    async fn delete_conversation(&self, conversation_id: i64) -> Result<(), GatewayError> {
        let resp = gloo_net::http::Request::delete(&format!("/api/conversations/{conversation_id}"))
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        if !resp.ok() {
            return Err(GatewayError::Status(resp.status()));
        }
        Ok(())
    }

    async fn get_conversation_settings(
        &self,
        settings_id: i64,
    ) -> Result<ConversationSetting, GatewayError> {
        get_json(&format!("/api/conversation-settings/{settings_id}")).await
    }

    async fn update_conversation_settings(
        &self,
        setting: &ConversationSetting,
    ) -> Result<ConversationSetting, GatewayError> {
        post_json(&format!("/api/conversation-settings/{}", setting.id), setting).await
    }

    async fn get_default_conversation_settings(&self) -> Result<ConversationSetting, GatewayError> {
        get_json("/api/conversation-settings/default").await
    }

    async fn set_default_conversation_settings(
        &self,
        setting: &ConversationSetting,
    ) -> Result<ConversationSetting, GatewayError> {
        post_json("/api/conversation-settings/default", setting).await
    }

    async fn list_available_tools(&self) -> Result<Vec<AvailableTool>, GatewayError> {
        get_json("/api/tools").await
    }
}
