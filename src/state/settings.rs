#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use crate::net::types::{AvailableTool, ConversationSetting};

/// Form state for the conversation-settings dialog.
///
/// Settings are not part of the concurrency-sensitive core: they are loaded
/// when the dialog opens and written back only on an explicit save.
#[derive(Clone, Debug, Default)]
pub struct SettingsFormState {
    pub open: bool,
    pub saving: bool,
    /// True when editing the defaults (the "new conversation" settings) rather
    /// than one conversation's settings.
    pub editing_default: bool,
    pub setting: Option<ConversationSetting>,
    /// Backend-advertised tool list driving the checkboxes.
    pub available_tools: Vec<AvailableTool>,
}

/// Toggle membership of `tool_id` in an enabled-tools set.
pub fn toggle_tool(tools_enabled: &mut Vec<String>, tool_id: &str) {
    if let Some(pos) = tools_enabled.iter().position(|t| t == tool_id) {
        tools_enabled.remove(pos);
    } else {
        tools_enabled.push(tool_id.to_owned());
    }
}
