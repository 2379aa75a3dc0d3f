//! Browser-side wiring of the synchronization core.
//!
//! The [`Engine`] is handed out through Leptos context so components can issue
//! actions without knowing about the gateway, the event hub, or the
//! subscription lifecycle. On the server (SSR) it is an inert handle, the same
//! way the reference transport handle degrades: components render, actions do
//! nothing.

use leptos::prelude::{RwSignal, Update};

use crate::state::conversation::ConversationState;
use crate::state::conversations::ConversationListState;
use crate::state::errors::ErrorState;
use crate::state::settings::SettingsFormState;

#[cfg(feature = "hydrate")]
use std::cell::RefCell;
#[cfg(feature = "hydrate")]
use std::rc::Rc;

#[cfg(feature = "hydrate")]
use leptos::prelude::WithUntracked;

#[cfg(feature = "hydrate")]
use crate::net::events::{EventHub, Subscription, topics};
#[cfg(feature = "hydrate")]
use crate::net::gateway::{Gateway, HttpGateway};
#[cfg(feature = "hydrate")]
use crate::state::errors::DISMISS_AFTER;
#[cfg(feature = "hydrate")]
use crate::sync::actions::ActionDispatcher;
#[cfg(feature = "hydrate")]
use crate::sync::controller::SyncController;
#[cfg(feature = "hydrate")]
use crate::sync::subscriptions::SubscriptionManager;

/// UI-facing handle to the sync engine. Cheap to clone; provided via context.
///
/// The inner handle is single-threaded; `SendWrapper` satisfies the context
/// bounds and is sound because the hydrated app runs on one thread.
#[derive(Clone)]
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
pub struct Engine {
    chat: RwSignal<ConversationState>,
    conversations: RwSignal<ConversationListState>,
    errors: RwSignal<ErrorState>,
    settings_form: RwSignal<SettingsFormState>,
    #[cfg(feature = "hydrate")]
    inner: send_wrapper::SendWrapper<Rc<EngineInner>>,
}

#[cfg(feature = "hydrate")]
struct EngineInner {
    gateway: HttpGateway,
    hub: EventHub,
    controller: SyncController<HttpGateway, RwSignal<ConversationState>>,
    dispatcher: ActionDispatcher<HttpGateway, RwSignal<ConversationState>>,
    subscriptions: RefCell<SubscriptionManager>,
    // Keeps the list-level and error listeners alive for the app's lifetime.
    _global_subscriptions: Vec<Subscription>,
}

impl Engine {
    /// Build the engine and, in the browser, connect it to the backend: start
    /// the push pump, bind the global topics, and fetch the conversation list.
    pub fn new(
        chat: RwSignal<ConversationState>,
        conversations: RwSignal<ConversationListState>,
        errors: RwSignal<ErrorState>,
        settings_form: RwSignal<SettingsFormState>,
    ) -> Self {
        #[cfg(feature = "hydrate")]
        {
            let gateway = HttpGateway::new();
            let hub = EventHub::new();
            crate::net::push::spawn_push_client(hub.clone());

            let controller = SyncController::new(gateway, chat);
            let dispatcher = ActionDispatcher::new(gateway, chat);

            let mut global_subscriptions = Vec::new();
            global_subscriptions.push(hub.subscribe(topics::CONVERSATIONS_UPDATED, move |_| {
                refresh_conversations(gateway, conversations);
            }));
            global_subscriptions.push(hub.subscribe(topics::ASYNC_ERROR, move |data| {
                surface_async_error(errors, data);
            }));

            let engine = Self {
                chat,
                conversations,
                errors,
                settings_form,
                inner: send_wrapper::SendWrapper::new(Rc::new(EngineInner {
                    gateway,
                    hub,
                    controller,
                    dispatcher,
                    subscriptions: RefCell::new(SubscriptionManager::new()),
                    _global_subscriptions: global_subscriptions,
                })),
            };
            refresh_conversations(gateway, conversations);
            engine
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Self {
                chat,
                conversations,
                errors,
                settings_form,
            }
        }
    }

    /// Switch the selected conversation (or clear it with `None`): rebind the
    /// push listeners, reset the cache, and kick off the initial fetch set.
    pub fn select_conversation(&self, id: Option<i64>) {
        #[cfg(feature = "hydrate")]
        {
            let inner = &self.inner;
            inner.controller.select(id);

            let on_updated = {
                let controller = inner.controller.clone();
                move |id| leptos::task::spawn_local(controller.refresh_conversation(id))
            };
            let on_approvals = {
                let controller = inner.controller.clone();
                move |id| leptos::task::spawn_local(controller.refresh_approvals(id))
            };
            inner
                .subscriptions
                .borrow_mut()
                .rebind(&inner.hub, id, on_updated, on_approvals);

            if let Some(id) = id {
                leptos::task::spawn_local(inner.controller.refresh_all(id));
            }
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    }

    /// Send `text` to the selected conversation, or create a new conversation
    /// when none is selected. A newly created conversation becomes the
    /// selected one.
    pub fn send_message(&self, text: String) {
        #[cfg(feature = "hydrate")]
        {
            let selected = self.chat.with_untracked(|c| c.selected);
            let dispatcher = self.inner.dispatcher.clone();
            let engine = self.clone();
            leptos::task::spawn_local(async move {
                if let Some(conversation_id) = dispatcher.send_message(selected, &text).await {
                    if selected != Some(conversation_id) {
                        engine.select_conversation(Some(conversation_id));
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = text;
    }

    /// Rerun generation from `message_id` in the selected conversation.
    pub fn rerun_from(&self, message_id: i64) {
        #[cfg(feature = "hydrate")]
        if let Some(conversation_id) = self.chat.with_untracked(|c| c.selected) {
            let dispatcher = self.inner.dispatcher.clone();
            leptos::task::spawn_local(async move {
                dispatcher.rerun_from_message(conversation_id, message_id).await;
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = message_id;
    }

    /// Stop the selected conversation's generation.
    pub fn cancel_generation(&self) {
        #[cfg(feature = "hydrate")]
        if let Some(conversation_id) = self.chat.with_untracked(|c| c.selected) {
            let dispatcher = self.inner.dispatcher.clone();
            leptos::task::spawn_local(async move {
                dispatcher.cancel_generation(conversation_id).await;
            });
        }
    }

    /// Approve the outstanding tool-call request.
    pub fn approve(&self, approval_id: String) {
        #[cfg(feature = "hydrate")]
        if let Some(conversation_id) = self.chat.with_untracked(|c| c.selected) {
            let dispatcher = self.inner.dispatcher.clone();
            leptos::task::spawn_local(async move {
                dispatcher.approve(conversation_id, &approval_id).await;
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = approval_id;
    }

    /// Delete a conversation; deselects on success. The sidebar list refreshes
    /// via `conversations-updated`.
    pub fn delete_conversation(&self, conversation_id: i64) {
        #[cfg(feature = "hydrate")]
        {
            let dispatcher = self.inner.dispatcher.clone();
            let engine = self.clone();
            leptos::task::spawn_local(async move {
                if dispatcher.delete_conversation(conversation_id).await {
                    engine.select_conversation(None);
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = conversation_id;
    }

    /// Dismiss the error toast immediately.
    pub fn dismiss_error(&self) {
        self.errors.update(|e| e.dismiss());
    }

    /// Open the settings dialog: `Some(id)` edits one conversation's settings,
    /// `None` edits the defaults used for new conversations. Loads the setting
    /// and the backend's tool list concurrently.
    pub fn open_conversation_settings(&self, settings_id: Option<i64>) {
        self.settings_form.update(|f| {
            *f = SettingsFormState {
                open: true,
                editing_default: settings_id.is_none(),
                ..SettingsFormState::default()
            };
        });
        #[cfg(feature = "hydrate")]
        {
            let gateway = self.inner.gateway;
            let settings_form = self.settings_form;
            leptos::task::spawn_local(async move {
                let (setting, tools) = futures::join!(
                    async {
                        match settings_id {
                            Some(id) => gateway.get_conversation_settings(id).await,
                            None => gateway.get_default_conversation_settings().await,
                        }
                    },
                    gateway.list_available_tools(),
                );
                settings_form.update(|f| {
                    if !f.open {
                        return;
                    }
                    match setting {
                        Ok(setting) => f.setting = Some(setting),
                        Err(e) => leptos::logging::warn!("couldn't load settings: {e}"),
                    }
                    match tools {
                        Ok(tools) => f.available_tools = tools,
                        Err(e) => leptos::logging::warn!("couldn't list tools: {e}"),
                    }
                });
            });
        }
    }

    /// Persist the settings currently in the form, then close the dialog.
    pub fn save_conversation_settings(&self) {
        #[cfg(feature = "hydrate")]
        {
            let Some((setting, editing_default)) = self
                .settings_form
                .with_untracked(|f| f.setting.clone().map(|s| (s, f.editing_default)))
            else {
                return;
            };
            let gateway = self.inner.gateway;
            let settings_form = self.settings_form;
            settings_form.update(|f| f.saving = true);
            leptos::task::spawn_local(async move {
                let result = if editing_default {
                    gateway.set_default_conversation_settings(&setting).await
                } else {
                    gateway.update_conversation_settings(&setting).await
                };
                if let Err(e) = result {
                    leptos::logging::warn!("couldn't save settings: {e}");
                }
                settings_form.update(|f| {
                    f.saving = false;
                    f.open = false;
                });
            });
        }
    }

    /// Close the settings dialog without saving.
    pub fn close_settings(&self) {
        self.settings_form.update(|f| f.open = false);
    }
}

#[cfg(feature = "hydrate")]
fn refresh_conversations(gateway: HttpGateway, conversations: RwSignal<ConversationListState>) {
    conversations.update(|c| c.loading = true);
    leptos::task::spawn_local(async move {
        match gateway.list_conversations().await {
            Ok(items) => conversations.update(|c| {
                c.items = items;
                c.loading = false;
            }),
            Err(e) => {
                leptos::logging::warn!("couldn't list conversations: {e}");
                conversations.update(|c| c.loading = false);
            }
        }
    });
}

/// Surface an `async-error` payload transiently: show it, then clear it after
/// [`DISMISS_AFTER`] unless a newer error replaced it in the meantime.
#[cfg(feature = "hydrate")]
fn surface_async_error(errors: RwSignal<ErrorState>, data: Option<&str>) {
    let message = data.unwrap_or("unknown backend error").to_owned();
    let epoch = errors
        .try_update(|e| e.show(message))
        .unwrap_or_default();
    leptos::task::spawn_local(async move {
        gloo_timers::future::sleep(DISMISS_AFTER).await;
        errors.update(|e| e.dismiss_if_current(epoch));
    });
}
