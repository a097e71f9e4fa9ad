//! Incremental key sequence reader
//!
//! Drives the manager one keystroke at a time the way an input loop does:
//! accumulate tokens, resolve after each one, and act on the verdict.
//! Keystring remaps are followed here rather than inside the manager.

use super::action::Action;
use super::binding::Binding;
use super::manager::{KeyAction, KeyBindingManager};
use super::notation::Keystroke;
use super::view::ViewId;

/// Maximum number of keystring remaps followed for one matched sequence
pub const MAX_REMAP_DEPTH: usize = 16;

/// Accumulates typed tokens and turns them into actions
#[derive(Debug, Clone, Default)]
pub struct KeySequenceReader {
    pending: String,
}

impl KeySequenceReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one key token and resolve the accumulated sequence
    ///
    /// Returns `Execute`, `AwaitMore` or `NoMatch`; remaps are resolved
    /// before returning, so `Remap` never escapes this call.
    pub fn feed(
        &mut self,
        manager: &KeyBindingManager,
        hierarchy: &[ViewId],
        token: &str,
    ) -> KeyAction {
        self.pending.push_str(token);
        let resolution = manager.resolve(hierarchy, &self.pending);

        let outcome = match resolution.verdict() {
            KeyAction::AwaitMore => return KeyAction::AwaitMore,
            KeyAction::Remap(keys) => self.follow_remap(manager, hierarchy, keys),
            other => other,
        };

        self.reset();
        outcome
    }

    /// Append a keystroke from the backend, encoded as its token
    pub fn feed_keystroke(
        &mut self,
        manager: &KeyBindingManager,
        hierarchy: &[ViewId],
        keystroke: Keystroke,
    ) -> KeyAction {
        self.feed(manager, hierarchy, &keystroke.to_token())
    }

    /// Resolve a replacement sequence, following further remaps
    fn follow_remap(
        &self,
        manager: &KeyBindingManager,
        hierarchy: &[ViewId],
        mut keys: String,
    ) -> KeyAction {
        for depth in 1..=MAX_REMAP_DEPTH {
            let resolution = manager.resolve(hierarchy, &keys);
            tracing::debug!(from = %self.pending, to = %keys, depth, "Following key remap");

            match resolution.binding {
                Binding::Keystring(next) => keys = next,
                Binding::Action(action) if !action.is_none() => {
                    return KeyAction::Execute(action);
                }
                Binding::Action(_) => {
                    tracing::warn!(
                        from = %self.pending,
                        to = %keys,
                        "Key remap does not resolve to a binding"
                    );
                    return KeyAction::NoMatch;
                }
            }
        }

        tracing::warn!(
            from = %self.pending,
            max_depth = MAX_REMAP_DEPTH,
            "Key remap chain too deep, possible cycle"
        );
        KeyAction::NoMatch
    }

    /// Resolve a whole sequence at once, following remaps
    ///
    /// Returns the action it leads to, `Action::None` when it leads nowhere.
    pub fn resolve_action(
        manager: &KeyBindingManager,
        hierarchy: &[ViewId],
        sequence: &str,
    ) -> Action {
        let mut reader = Self::new();
        match reader.feed(manager, hierarchy, sequence) {
            KeyAction::Execute(action) => action,
            _ => Action::None,
        }
    }

    /// Drop any partially typed sequence
    pub fn reset(&mut self) {
        self.pending.clear();
    }

    /// The sequence typed so far
    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Pending sequence for status bar display
    pub fn pending_display(&self) -> Option<String> {
        self.has_pending()
            .then(|| super::notation::display_sequence(&self.pending))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::notation::{KeyCode, Modifiers};

    fn manager() -> KeyBindingManager {
        let mut manager = KeyBindingManager::empty();
        manager.set_action_binding(ViewId::All, "j", Action::NextLine);
        manager.set_action_binding(ViewId::All, "gg", Action::FirstLine);
        manager.set_action_binding(ViewId::All, "<C-w>w", Action::NextView);
        manager
    }

    #[test]
    fn test_single_key_executes() {
        let mut reader = KeySequenceReader::new();
        assert_eq!(
            reader.feed(&manager(), &[ViewId::Main], "j"),
            KeyAction::Execute(Action::NextLine)
        );
        assert!(!reader.has_pending());
    }

    #[test]
    fn test_multi_key_awaits_then_executes() {
        let manager = manager();
        let mut reader = KeySequenceReader::new();

        assert_eq!(reader.feed(&manager, &[], "g"), KeyAction::AwaitMore);
        assert_eq!(reader.pending(), "g");
        assert_eq!(
            reader.feed(&manager, &[], "g"),
            KeyAction::Execute(Action::FirstLine)
        );
        assert_eq!(reader.pending(), "");
    }

    #[test]
    fn test_mismatch_discards_buffer() {
        let manager = manager();
        let mut reader = KeySequenceReader::new();

        assert_eq!(reader.feed(&manager, &[], "g"), KeyAction::AwaitMore);
        assert_eq!(reader.feed(&manager, &[], "x"), KeyAction::NoMatch);
        assert!(!reader.has_pending());

        // Fresh start afterwards
        assert_eq!(reader.feed(&manager, &[], "j"), KeyAction::Execute(Action::NextLine));
    }

    #[test]
    fn test_keystroke_chord() {
        let manager = manager();
        let mut reader = KeySequenceReader::new();
        let ctrl_w = Keystroke::new(KeyCode::Char('w'), Modifiers::CTRL);

        assert_eq!(reader.feed_keystroke(&manager, &[], ctrl_w), KeyAction::AwaitMore);
        assert_eq!(reader.pending_display(), Some("<C-w>".to_string()));
        assert_eq!(
            reader.feed_keystroke(&manager, &[], Keystroke::char('w')),
            KeyAction::Execute(Action::NextView)
        );
    }

    #[test]
    fn test_literal_angle_bracket_is_not_a_token_prefix() {
        let manager = KeyBindingManager::with_builtin_defaults();
        let mut reader = KeySequenceReader::new();

        let typed: Vec<KeyAction> = "<Up>"
            .chars()
            .map(|c| reader.feed_keystroke(&manager, &[ViewId::Main], Keystroke::char(c)))
            .collect();
        assert!(typed.iter().all(|outcome| *outcome == KeyAction::NoMatch));

        assert_eq!(
            reader.feed_keystroke(&manager, &[ViewId::Main], Keystroke::char('<')),
            KeyAction::NoMatch
        );
        assert_eq!(
            reader.feed_keystroke(&manager, &[ViewId::Main], Keystroke::char('j')),
            KeyAction::Execute(Action::NextLine)
        );
    }

    #[test]
    fn test_bound_angle_bracket_executes() {
        let mut manager = manager();
        manager.set_action_binding(ViewId::All, "<lt>", Action::ScrollLeft);

        let mut reader = KeySequenceReader::new();
        assert_eq!(
            reader.feed_keystroke(&manager, &[], Keystroke::char('<')),
            KeyAction::Execute(Action::ScrollLeft)
        );
    }

    #[test]
    fn test_remap_is_followed() {
        let mut manager = manager();
        manager.set_keystring_binding(ViewId::Main, "J", "gg");

        let mut reader = KeySequenceReader::new();
        assert_eq!(
            reader.feed(&manager, &[ViewId::Main], "J"),
            KeyAction::Execute(Action::FirstLine)
        );
        assert!(!reader.has_pending());
    }

    #[test]
    fn test_remap_chain() {
        let mut manager = manager();
        manager.set_keystring_binding(ViewId::All, "a", "b");
        manager.set_keystring_binding(ViewId::All, "b", "j");

        assert_eq!(
            KeySequenceReader::resolve_action(&manager, &[], "a"),
            Action::NextLine
        );
    }

    #[test]
    fn test_remap_to_action_name() {
        let mut manager = KeyBindingManager::new(&Default::default());
        manager.set_keystring_binding(ViewId::All, "x", "<vk-exit>");

        assert_eq!(KeySequenceReader::resolve_action(&manager, &[], "x"), Action::Exit);
    }

    #[test]
    fn test_remap_cycle_is_bounded() {
        let mut manager = KeyBindingManager::empty();
        manager.set_keystring_binding(ViewId::All, "a", "b");
        manager.set_keystring_binding(ViewId::All, "b", "a");

        let mut reader = KeySequenceReader::new();
        assert_eq!(reader.feed(&manager, &[], "a"), KeyAction::NoMatch);
        assert!(!reader.has_pending());
    }

    #[test]
    fn test_remap_to_prefix_is_no_match() {
        let mut manager = manager();
        manager.set_keystring_binding(ViewId::All, "x", "g");

        assert_eq!(KeySequenceReader::resolve_action(&manager, &[], "x"), Action::None);
    }

    #[test]
    fn test_reset_clears_pending() {
        let manager = manager();
        let mut reader = KeySequenceReader::new();
        reader.feed(&manager, &[], "g");
        assert!(reader.has_pending());

        reader.reset();
        assert!(!reader.has_pending());
        assert_eq!(reader.pending_display(), None);
    }
}
