//! Conversation list sidebar.

use leptos::prelude::*;

use crate::state::conversation::ConversationState;
use crate::state::conversations::ConversationListState;
use crate::sync::engine::Engine;

/// Sidebar listing every conversation, newest activity first as the backend
/// returns them, plus entry points for a new conversation and for settings.
#[component]
pub fn Sidebar() -> impl IntoView {
    let chat = expect_context::<RwSignal<ConversationState>>();
    let conversations = expect_context::<RwSignal<ConversationListState>>();
    let engine = expect_context::<Engine>();

    let on_new = {
        let engine = engine.clone();
        move |_| engine.select_conversation(None)
    };
    let on_defaults = {
        let engine = engine.clone();
        move |_| engine.open_conversation_settings(None)
    };

    view! {
        <div class="sidebar">
            <div class="sidebar__header">
                <button class="btn btn--primary sidebar__new" on:click=on_new>
                    "New conversation"
                </button>
                <button class="btn sidebar__defaults" on:click=on_defaults>
                    "Defaults"
                </button>
            </div>

            <div class="sidebar__list">
                {move || {
                    let list = conversations.get();
                    if list.items.is_empty() {
                        let label = if list.loading { "Loading..." } else { "No conversations yet" };
                        return view! {
                            <div class="sidebar__empty">{label}</div>
                        }
                            .into_any();
                    }

                    let selected = chat.get().selected;
                    list.items
                        .iter()
                        .map(|conversation| {
                            let id = conversation.id;
                            let settings_id = conversation.conversation_settings_id;
                            let title = conversation.title.clone();
                            let generating = conversation.generating;
                            let engine_select = engine.clone();
                            let engine_settings = engine.clone();
                            let engine_delete = engine.clone();
                            view! {
                                <div
                                    class="sidebar__item"
                                    class:sidebar__item--selected=move || selected == Some(id)
                                    on:click=move |_| engine_select.select_conversation(Some(id))
                                >
                                    <span class="sidebar__title">{title}</span>
                                    <span class="sidebar__badge" hidden=!generating>
                                        "generating"
                                    </span>
                                    <button
                                        class="btn btn--icon sidebar__settings"
                                        on:click=move |ev| {
                                            ev.stop_propagation();
                                            engine_settings.open_conversation_settings(Some(settings_id));
                                        }
                                    >
                                        "\u{2699}"
                                    </button>
                                    <button
                                        class="btn btn--icon sidebar__delete"
                                        on:click=move |ev| {
                                            ev.stop_propagation();
                                            engine_delete.delete_conversation(id);
                                        }
                                    >
                                        "\u{00d7}"
                                    </button>
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()
                        .into_any()
                }}
            </div>
        </div>
    }
}
