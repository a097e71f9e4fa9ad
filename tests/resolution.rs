//! Key sequence resolution through the public API

use viewkeys::keymap::{KeyCode, Keystroke, Modifiers};
use viewkeys::{Action, Binding, KeyAction, KeyBindingManager, KeySequenceReader, ViewId};

fn type_keys(
    manager: &KeyBindingManager,
    hierarchy: &[ViewId],
    tokens: &[&str],
) -> Vec<KeyAction> {
    let mut reader = KeySequenceReader::new();
    tokens
        .iter()
        .map(|token| reader.feed(manager, hierarchy, token))
        .collect()
}

#[test]
fn test_typing_gg_then_j() {
    let manager = KeyBindingManager::with_builtin_defaults();
    let outcomes = type_keys(&manager, &[ViewId::Main], &["g", "g", "j"]);

    assert_eq!(
        outcomes,
        vec![
            KeyAction::AwaitMore,
            KeyAction::Execute(Action::FirstLine),
            KeyAction::Execute(Action::NextLine),
        ]
    );
}

#[test]
fn test_mistyped_sequence_restarts() {
    let manager = KeyBindingManager::with_builtin_defaults();
    let outcomes = type_keys(&manager, &[ViewId::Main], &["g", "z", "G"]);

    assert_eq!(
        outcomes,
        vec![
            KeyAction::AwaitMore,
            KeyAction::NoMatch,
            KeyAction::Execute(Action::LastLine),
        ]
    );
}

#[test]
fn test_backend_keystrokes() {
    let manager = KeyBindingManager::with_builtin_defaults();
    let mut reader = KeySequenceReader::new();
    let hierarchy = [ViewId::CommitList, ViewId::Main];

    let shift_tab = Keystroke::new(KeyCode::Tab, Modifiers::SHIFT);
    assert_eq!(
        reader.feed_keystroke(&manager, &hierarchy, shift_tab),
        KeyAction::Execute(Action::PrevView)
    );

    let down = Keystroke::key(KeyCode::Down);
    assert_eq!(
        reader.feed_keystroke(&manager, &hierarchy, down),
        KeyAction::Execute(Action::NextLine)
    );

    let enter = Keystroke::key(KeyCode::Enter);
    assert_eq!(
        reader.feed_keystroke(&manager, &hierarchy, enter),
        KeyAction::Execute(Action::Select)
    );
}

#[test]
fn test_view_override_with_wildcard_fallback() {
    let mut manager = KeyBindingManager::with_builtin_defaults();
    manager.set_action_binding(ViewId::RefList, "<Enter>", Action::FullScreenView);

    assert_eq!(
        manager.resolve(&[ViewId::RefList, ViewId::Main], "<Enter>").binding,
        Binding::Action(Action::FullScreenView)
    );
    assert_eq!(
        manager.resolve(&[ViewId::History, ViewId::Main], "<Enter>").binding,
        Binding::Action(Action::Select)
    );
}

#[test]
fn test_remap_through_action_name() {
    let mut manager = KeyBindingManager::with_builtin_defaults();
    manager.set_keystring_binding(ViewId::Main, "Q", "<vk-exit>");

    let resolution = manager.resolve(&[ViewId::Main], "Q");
    assert_eq!(resolution.verdict(), KeyAction::Remap("<vk-exit>".to_string()));

    let outcomes = type_keys(&manager, &[ViewId::Main], &["Q"]);
    assert_eq!(outcomes, vec![KeyAction::Execute(Action::Exit)]);
}

#[test]
fn test_manager_behind_mutex() {
    use std::sync::{Arc, Mutex};

    let shared = Arc::new(Mutex::new(KeyBindingManager::with_builtin_defaults()));
    let writer = Arc::clone(&shared);
    std::thread::spawn(move || {
        writer
            .lock()
            .unwrap()
            .set_action_binding(ViewId::All, "x", Action::Exit);
    })
    .join()
    .unwrap();

    let manager = shared.lock().unwrap();
    assert_eq!(
        manager.resolve(&[ViewId::Main], "x").binding,
        Binding::Action(Action::Exit)
    );
}
