use super::*;

fn conversation(id: i64, generating: bool) -> Conversation {
    Conversation {
        id,
        conversation_settings_id: 1,
        title: "t".to_owned(),
        last_message_time: "2023-05-01T12:00:00Z".to_owned(),
        generating,
    }
}

#[test]
fn default_state_is_empty() {
    let state = ConversationState::default();
    assert_eq!(state.phase, SyncPhase::Empty);
    assert!(state.selected.is_none());
    assert!(state.conversation.is_none());
    assert!(state.messages.is_empty());
    assert!(state.approvals.is_empty());
}

#[test]
fn generating_is_false_without_metadata() {
    let mut state = ConversationState::default();
    assert!(!state.generating());

    state.conversation = Some(conversation(1, false));
    assert!(!state.generating());

    state.conversation = Some(conversation(1, true));
    assert!(state.generating());
}

#[test]
fn is_selected_matches_only_current_id() {
    let mut state = ConversationState::default();
    assert!(!state.is_selected(1));

    state.selected = Some(1);
    assert!(state.is_selected(1));
    assert!(!state.is_selected(2));
}

#[test]
fn clear_drops_everything() {
    let mut state = ConversationState {
        selected: Some(3),
        phase: SyncPhase::Ready,
        conversation: Some(conversation(3, true)),
        messages: vec![Message {
            id: 1,
            conversation_id: 3,
            content: "hi".to_owned(),
            author: "user".to_owned(),
        }],
        approvals: vec![ApprovalRequest {
            id: "a1".to_owned(),
            message: "run terminal".to_owned(),
        }],
    };

    state.clear();

    assert_eq!(state.phase, SyncPhase::Empty);
    assert!(state.selected.is_none());
    assert!(state.conversation.is_none());
    assert!(state.messages.is_empty());
    assert!(state.approvals.is_empty());
}
