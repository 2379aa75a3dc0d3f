//! Transient banner for backend-reported failures.

use leptos::prelude::*;

use crate::state::errors::ErrorState;
use crate::sync::engine::Engine;

/// Toast for `async-error` pushes. The engine clears it automatically after a
/// few seconds; the close button clears it immediately.
#[component]
pub fn ErrorToast() -> impl IntoView {
    let errors = expect_context::<RwSignal<ErrorState>>();
    let engine = expect_context::<Engine>();

    move || {
        let Some(message) = errors.get().message else {
            return ().into_any();
        };
        let engine = engine.clone();
        view! {
            <div class="toast toast--error">
                <span class="toast__text">{message}</span>
                <button class="btn btn--icon toast__close" on:click=move |_| engine.dismiss_error()>
                    "\u{00d7}"
                </button>
            </div>
        }
            .into_any()
    }
}
