//! Message history for the selected conversation.

use leptos::prelude::*;

use crate::components::chat_input::ChatInput;
use crate::state::conversation::{ConversationState, SyncPhase};
use crate::sync::engine::Engine;

/// Main panel: message history, the outstanding approval banner, generation
/// controls, and the input box.
#[component]
pub fn ChatPanel() -> impl IntoView {
    let chat = expect_context::<RwSignal<ConversationState>>();
    let engine = expect_context::<Engine>();

    let messages_ref = NodeRef::<leptos::html::Div>::new();

    // Pin the scroll to the newest message as history grows.
    Effect::new(move || {
        let _ = chat.get().messages.len();

        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = messages_ref.get() {
                let scroll_height = el.scroll_height();
                el.set_scroll_top(scroll_height);
            }
        }
    });

    let on_cancel = {
        let engine = engine.clone();
        move |_| engine.cancel_generation()
    };

    let history = {
        let engine = engine.clone();
        move || {
            let state = chat.get();
            match state.phase {
                SyncPhase::Empty => {
                    return view! {
                        <div class="chat__empty">"Select a conversation or start a new one."</div>
                    }
                        .into_any();
                }
                SyncPhase::Loading => {
                    return view! {
                        <div class="chat__empty">"Loading..."</div>
                    }
                        .into_any();
                }
                SyncPhase::Ready => {}
            }

            state
                .messages
                .iter()
                .map(|msg| {
                    let message_id = msg.id;
                    let content = msg.content.clone();
                    let from_user = msg.is_user();
                    let engine = engine.clone();
                    view! {
                        <div
                            class="chat__message"
                            class:chat__message--user=from_user
                            class:chat__message--assistant=!from_user
                        >
                            <div class="chat__bubble">{content}</div>
                            <button
                                class="btn btn--icon chat__rerun"
                                title="Rerun from here"
                                on:click=move |_| engine.rerun_from(message_id)
                            >
                                "\u{21bb}"
                            </button>
                        </div>
                    }
                })
                .collect::<Vec<_>>()
                .into_any()
        }
    };

    let approval_banner = {
        let engine = engine.clone();
        move || {
            // The backend keeps at most one request outstanding per
            // conversation; render the head of the list.
            let Some(request) = chat.get().approvals.first().cloned() else {
                return ().into_any();
            };
            let engine = engine.clone();
            view! {
                <div class="chat__approval">
                    <span class="chat__approval-text">{request.message.clone()}</span>
                    <button
                        class="btn btn--primary chat__approve"
                        on:click=move |_| engine.approve(request.id.clone())
                    >
                        "Approve"
                    </button>
                </div>
            }
                .into_any()
        }
    };

    view! {
        <div class="chat">
            <div class="chat__messages" node_ref=messages_ref>
                {history}
            </div>

            {approval_banner}

            <div class="chat__status" hidden=move || !chat.get().generating()>
                <span class="chat__generating">"Generating..."</span>
                <button class="btn chat__cancel" on:click=on_cancel>
                    "Stop"
                </button>
            </div>

            <ChatInput/>
        </div>
    }
}
