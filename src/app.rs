//! Root application component and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};

use crate::components::chat_panel::ChatPanel;
use crate::components::error_toast::ErrorToast;
use crate::components::settings_dialog::SettingsDialog;
use crate::components::sidebar::Sidebar;
use crate::state::conversation::ConversationState;
use crate::state::conversations::ConversationListState;
use crate::state::errors::ErrorState;
use crate::state::settings::SettingsFormState;
use crate::sync::engine::Engine;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the shared state contexts and the sync [`Engine`], which connects
/// to the backend on hydration.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let chat = RwSignal::new(ConversationState::default());
    let conversations = RwSignal::new(ConversationListState::default());
    let errors = RwSignal::new(ErrorState::default());
    let settings_form = RwSignal::new(SettingsFormState::default());

    let engine = Engine::new(chat, conversations, errors, settings_form);

    provide_context(chat);
    provide_context(conversations);
    provide_context(errors);
    provide_context(settings_form);
    provide_context(engine);

    view! {
        <Stylesheet id="leptos" href="/pkg/cuttlefish.css"/>
        <Title text="Cuttlefish"/>

        <div class="app">
            <Sidebar/>
            <ChatPanel/>
            <ErrorToast/>
            <SettingsDialog/>
        </div>
    }
}
