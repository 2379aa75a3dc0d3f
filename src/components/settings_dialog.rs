//! Conversation settings dialog.

use leptos::prelude::*;

use crate::state::settings::{SettingsFormState, toggle_tool};
use crate::sync::engine::Engine;

/// Modal editor for a conversation's system prompt template and enabled
/// tools. Also edits the defaults applied to new conversations when opened
/// from the sidebar's defaults button.
#[component]
pub fn SettingsDialog() -> impl IntoView {
    let settings_form = expect_context::<RwSignal<SettingsFormState>>();
    let engine = expect_context::<Engine>();

    let on_close = {
        let engine = engine.clone();
        move |_| engine.close_settings()
    };
    let on_save = {
        let engine = engine.clone();
        move |_| engine.save_conversation_settings()
    };

    let on_prompt_input = move |ev| {
        let value = event_target_value(&ev);
        settings_form.update(|f| {
            if let Some(setting) = f.setting.as_mut() {
                setting.system_prompt_template = value;
            }
        });
    };

    move || {
        let form = settings_form.get();
        if !form.open {
            return ().into_any();
        }

        let title = if form.editing_default {
            "Default conversation settings"
        } else {
            "Conversation settings"
        };

        let body = match form.setting {
            None => view! {
                <div class="dialog__loading">"Loading..."</div>
            }
                .into_any(),
            Some(setting) => {
                let prompt = setting.system_prompt_template.clone();
                let tools = form
                    .available_tools
                    .iter()
                    .map(|tool| {
                        let tool_id = tool.id.clone();
                        let enabled = setting.tools_enabled.iter().any(|t| *t == tool_id);
                        let label = tool.name.clone();
                        let on_toggle = move |_| {
                            settings_form.update(|f| {
                                if let Some(setting) = f.setting.as_mut() {
                                    toggle_tool(&mut setting.tools_enabled, &tool_id);
                                }
                            });
                        };
                        view! {
                            <label class="dialog__tool">
                                <input type="checkbox" checked=enabled on:change=on_toggle/>
                                <span class="dialog__tool-name">{label}</span>
                            </label>
                        }
                    })
                    .collect::<Vec<_>>();

                view! {
                    <div class="dialog__body">
                        <label class="dialog__label">"System prompt"</label>
                        <textarea
                            class="dialog__prompt"
                            prop:value=prompt
                            on:input=on_prompt_input
                        ></textarea>

                        <label class="dialog__label">"Tools"</label>
                        <div class="dialog__tools">{tools}</div>
                    </div>
                }
                    .into_any()
            }
        };

        let saving = form.saving;
        let on_close = on_close.clone();
        let on_save = on_save.clone();
        view! {
            <div class="dialog-backdrop">
                <div class="dialog">
                    <div class="dialog__header">{title}</div>
                    {body}
                    <div class="dialog__actions">
                        <button class="btn dialog__cancel" on:click=on_close>
                            "Cancel"
                        </button>
                        <button class="btn btn--primary dialog__save" on:click=on_save disabled=saving>
                            {if saving { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </div>
            </div>
        }
            .into_any()
    }
}
