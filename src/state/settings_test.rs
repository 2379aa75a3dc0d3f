use super::*;

#[test]
fn toggle_tool_adds_missing_id() {
    let mut enabled = vec!["terminal".to_owned()];
    toggle_tool(&mut enabled, "python");
    assert_eq!(enabled, vec!["terminal".to_owned(), "python".to_owned()]);
}

#[test]
fn toggle_tool_removes_present_id() {
    let mut enabled = vec!["terminal".to_owned(), "python".to_owned()];
    toggle_tool(&mut enabled, "terminal");
    assert_eq!(enabled, vec!["python".to_owned()]);
}

#[test]
fn toggle_twice_round_trips() {
    let mut enabled = Vec::new();
    toggle_tool(&mut enabled, "search");
    toggle_tool(&mut enabled, "search");
    assert!(enabled.is_empty());
}

#[test]
fn form_state_default_is_closed() {
    let form = SettingsFormState::default();
    assert!(!form.open);
    assert!(!form.saving);
    assert!(form.setting.is_none());
}
