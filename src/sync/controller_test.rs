use std::cell::RefCell;
use std::rc::Rc;

use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;

use super::*;
use crate::sync::mock_gateway::MockGateway;

type TestState = Rc<RefCell<ConversationState>>;

fn conversation(id: i64, generating: bool) -> Conversation {
    Conversation {
        id,
        conversation_settings_id: 1,
        title: format!("conversation {id}"),
        last_message_time: "2023-05-01T12:00:00Z".to_owned(),
        generating,
    }
}

fn message(id: i64, conversation_id: i64, author: &str, content: &str) -> Message {
    Message {
        id,
        conversation_id,
        content: content.to_owned(),
        author: author.to_owned(),
    }
}

fn approval(id: &str, message: &str) -> ApprovalRequest {
    ApprovalRequest {
        id: id.to_owned(),
        message: message.to_owned(),
    }
}

fn controller() -> (MockGateway, TestState, SyncController<MockGateway, TestState>) {
    let gateway = MockGateway::new();
    let state: TestState = Rc::default();
    let ctl = SyncController::new(gateway.clone(), state.clone());
    (gateway, state, ctl)
}

// =============================================================
// Pure apply functions: the stale-completion guard
// =============================================================

#[test]
fn apply_messages_discards_result_for_other_conversation() {
    let mut state = ConversationState::default();
    state.selected = Some(2);

    let applied = apply_messages(&mut state, 1, vec![message(1, 1, "user", "hi")]);

    assert!(!applied);
    assert!(state.messages.is_empty());
}

#[test]
fn apply_messages_replaces_wholesale() {
    let mut state = ConversationState::default();
    state.selected = Some(1);
    state.messages = vec![message(1, 1, "user", "old"), message(2, 1, "assistant", "old")];

    let fetched = vec![message(3, 1, "user", "new")];
    assert!(apply_messages(&mut state, 1, fetched.clone()));
    assert_eq!(state.messages, fetched);
}

#[test]
fn apply_conversation_update_is_atomic_pair() {
    let mut state = ConversationState::default();
    state.selected = Some(1);

    let msgs = vec![message(1, 1, "user", "hi")];
    assert!(apply_conversation_update(
        &mut state,
        1,
        msgs.clone(),
        conversation(1, true)
    ));

    assert_eq!(state.messages, msgs);
    assert!(state.generating());
}

#[test]
fn apply_conversation_update_discards_stale_pair() {
    let mut state = ConversationState::default();
    state.selected = Some(2);
    state.conversation = Some(conversation(2, false));

    let applied =
        apply_conversation_update(&mut state, 1, vec![message(1, 1, "user", "hi")], conversation(1, true));

    assert!(!applied);
    assert!(state.messages.is_empty());
    assert_eq!(state.conversation, Some(conversation(2, false)));
}

#[test]
fn apply_approvals_replaces_wholesale_and_stays_exclusive() {
    let mut state = ConversationState::default();
    state.selected = Some(1);

    assert!(apply_approvals(&mut state, 1, vec![approval("a1", "run terminal")]));
    assert_eq!(state.approvals.len(), 1);

    // The next approvals push replaces the list; it never accumulates.
    assert!(apply_approvals(&mut state, 1, vec![approval("a2", "run python")]));
    assert_eq!(state.approvals, vec![approval("a2", "run python")]);

    assert!(apply_approvals(&mut state, 1, Vec::new()));
    assert!(state.approvals.is_empty());
}

// =============================================================
// select
// =============================================================

#[test]
fn select_none_clears_to_empty() {
    let (_gateway, state, ctl) = controller();
    state.borrow_mut().selected = Some(1);
    state.borrow_mut().messages = vec![message(1, 1, "user", "hi")];

    ctl.select(None);

    let s = state.borrow();
    assert_eq!(s.phase, SyncPhase::Empty);
    assert!(s.selected.is_none());
    assert!(s.messages.is_empty());
}

#[test]
fn select_drops_previous_conversation_data() {
    let (_gateway, state, ctl) = controller();
    ctl.select(Some(1));
    state.borrow_mut().messages = vec![message(1, 1, "user", "hi")];
    state.borrow_mut().conversation = Some(conversation(1, false));

    ctl.select(Some(2));

    let s = state.borrow();
    assert_eq!(s.selected, Some(2));
    assert_eq!(s.phase, SyncPhase::Loading);
    assert!(s.messages.is_empty());
    assert!(s.conversation.is_none());
}

// =============================================================
// Async refresh flows
// =============================================================

#[test]
fn refresh_all_populates_state_and_reaches_ready() {
    let (gateway, state, ctl) = controller();
    gateway.insert_conversation(conversation(7, false));
    gateway.set_messages(7, vec![message(1, 7, "user", "hi")]);
    gateway.set_approvals(7, Vec::new());

    let mut pool = LocalPool::new();
    ctl.select(Some(7));
    pool.spawner().spawn_local(ctl.refresh_all(7)).unwrap();
    pool.run();

    let s = state.borrow();
    assert_eq!(s.phase, SyncPhase::Ready);
    assert_eq!(s.messages, vec![message(1, 7, "user", "hi")]);
    assert_eq!(s.conversation, Some(conversation(7, false)));
    assert!(s.approvals.is_empty());
}

#[test]
fn push_refresh_applies_new_messages_and_generating_together() {
    let (gateway, state, ctl) = controller();
    gateway.insert_conversation(conversation(7, false));

    let mut pool = LocalPool::new();
    ctl.select(Some(7));
    pool.spawner().spawn_local(ctl.refresh_all(7)).unwrap();
    pool.run();
    assert!(!state.borrow().generating());

    // Backend starts generating after a send and pushes conversation-7-updated.
    gateway.insert_conversation(conversation(7, true));
    gateway.set_messages(7, vec![message(1, 7, "user", "hi")]);
    pool.spawner()
        .spawn_local(ctl.refresh_conversation(7))
        .unwrap();
    pool.run();

    let s = state.borrow();
    assert_eq!(s.messages, vec![message(1, 7, "user", "hi")]);
    assert!(s.generating());
}

#[test]
fn stale_initial_fetch_never_overwrites_new_selection() {
    let (gateway, state, ctl) = controller();
    gateway.insert_conversation(conversation(1, false));
    gateway.set_messages(1, vec![message(1, 1, "user", "conversation one")]);
    gateway.insert_conversation(conversation(2, false));
    gateway.set_messages(2, vec![message(2, 2, "user", "conversation two")]);

    // Conversation 1's message fetch stalls until released.
    let release = gateway.defer("list_messages");

    let mut pool = LocalPool::new();
    ctl.select(Some(1));
    pool.spawner().spawn_local(ctl.refresh_all(1)).unwrap();
    pool.run_until_stalled();

    // Switch to conversation 2 while 1's fetch is still in flight.
    ctl.select(Some(2));
    pool.spawner().spawn_local(ctl.refresh_all(2)).unwrap();
    pool.run_until_stalled();
    assert_eq!(
        state.borrow().messages,
        vec![message(2, 2, "user", "conversation two")]
    );

    // Conversation 1's fetch finally resolves; its result must be discarded.
    release.send(()).unwrap();
    pool.run();

    let s = state.borrow();
    assert_eq!(s.selected, Some(2));
    assert_eq!(s.messages, vec![message(2, 2, "user", "conversation two")]);
    assert_eq!(s.conversation, Some(conversation(2, false)));
}

#[test]
fn stale_fetch_resolving_after_deselect_leaves_state_empty() {
    let (gateway, state, ctl) = controller();
    gateway.insert_conversation(conversation(1, false));
    gateway.set_messages(1, vec![message(1, 1, "user", "hi")]);
    let release = gateway.defer("list_messages");

    let mut pool = LocalPool::new();
    ctl.select(Some(1));
    pool.spawner().spawn_local(ctl.refresh_all(1)).unwrap();
    pool.run_until_stalled();

    ctl.select(None);
    release.send(()).unwrap();
    pool.run();

    let s = state.borrow();
    assert_eq!(s.phase, SyncPhase::Empty);
    assert!(s.messages.is_empty());
    assert!(s.conversation.is_none());
}

#[test]
fn refresh_failure_keeps_last_good_snapshot() {
    let (gateway, state, ctl) = controller();
    gateway.insert_conversation(conversation(7, false));
    gateway.set_messages(7, vec![message(1, 7, "user", "hi")]);

    let mut pool = LocalPool::new();
    ctl.select(Some(7));
    pool.spawner().spawn_local(ctl.refresh_all(7)).unwrap();
    pool.run();

    // A later targeted refresh fails (conversation gone from the mock): the
    // cached snapshot must survive untouched.
    gateway.remove_conversation(7);
    pool.spawner()
        .spawn_local(ctl.refresh_conversation(7))
        .unwrap();
    pool.run();

    let s = state.borrow();
    assert_eq!(s.messages, vec![message(1, 7, "user", "hi")]);
    assert_eq!(s.conversation, Some(conversation(7, false)));
}

#[test]
fn approvals_refresh_does_not_touch_messages() {
    let (gateway, state, ctl) = controller();
    gateway.insert_conversation(conversation(7, true));
    gateway.set_messages(7, vec![message(1, 7, "user", "hi")]);

    let mut pool = LocalPool::new();
    ctl.select(Some(7));
    pool.spawner().spawn_local(ctl.refresh_all(7)).unwrap();
    pool.run();

    gateway.set_approvals(7, vec![approval("a1", "run terminal")]);
    pool.spawner().spawn_local(ctl.refresh_approvals(7)).unwrap();
    pool.run();

    let s = state.borrow();
    assert_eq!(s.approvals, vec![approval("a1", "run terminal")]);
    assert_eq!(s.messages, vec![message(1, 7, "user", "hi")]);
}
