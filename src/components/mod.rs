//! UI components.

pub mod chat_input;
pub mod chat_panel;
pub mod error_toast;
pub mod settings_dialog;
pub mod sidebar;
