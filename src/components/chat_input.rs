//! Message composer.

use leptos::prelude::*;

use crate::state::conversation::ConversationState;
use crate::sync::engine::Engine;

/// Text input for sending a message. Enter sends, Shift+Enter inserts a
/// newline. Disabled while the selected conversation is generating; the
/// dispatcher enforces the same gate, this is just the visible half.
#[component]
pub fn ChatInput() -> impl IntoView {
    let chat = expect_context::<RwSignal<ConversationState>>();
    let engine = expect_context::<Engine>();

    let input = RwSignal::new(String::new());

    let blocked = move || chat.get().generating();

    let do_send = move || {
        let text = input.get();
        if text.trim().is_empty() || blocked() {
            return;
        }
        engine.send_message(text);
        input.set(String::new());
    };

    let on_click = {
        let do_send = do_send.clone();
        move |_| do_send()
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            do_send();
        }
    };

    let can_send = move || !input.get().trim().is_empty() && !blocked();

    view! {
        <div class="chat-input">
            <textarea
                class="chat-input__text"
                placeholder="Send a message..."
                prop:value=move || input.get()
                disabled=blocked
                on:input=move |ev| input.set(event_target_value(&ev))
                on:keydown=on_keydown
            ></textarea>
            <button
                class="btn btn--primary chat-input__send"
                on:click=on_click
                disabled=move || !can_send()
            >
                "Send"
            </button>
        </div>
    }
}
