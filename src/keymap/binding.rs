//! Binding value stored against a key sequence

use super::action::Action;

/// What a bound key sequence stands for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Execute an action
    Action(Action),
    /// Substitute another key sequence for the one just matched
    ///
    /// The engine never re-enters resolution for these; the caller feeds
    /// the replacement back in.
    Keystring(String),
}

impl Binding {
    /// The no-op binding returned when nothing matches
    pub const NONE: Binding = Binding::Action(Action::None);

    pub fn keystring(replacement: impl Into<String>) -> Self {
        Binding::Keystring(replacement.into())
    }

    /// The bound action; keystring bindings carry the no-op action
    pub fn action(&self) -> Action {
        match self {
            Binding::Action(action) => *action,
            Binding::Keystring(_) => Action::None,
        }
    }

    /// The replacement sequence, if this is a keystring binding
    pub fn replacement(&self) -> Option<&str> {
        match self {
            Binding::Keystring(keys) => Some(keys),
            Binding::Action(_) => None,
        }
    }

    /// Whether this is the no-op action binding
    pub fn is_none(&self) -> bool {
        matches!(self, Binding::Action(Action::None))
    }
}

impl From<Action> for Binding {
    fn from(action: Action) -> Self {
        Binding::Action(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_binding() {
        let binding = Binding::from(Action::Select);
        assert_eq!(binding.action(), Action::Select);
        assert_eq!(binding.replacement(), None);
        assert!(!binding.is_none());
    }

    #[test]
    fn test_keystring_binding_carries_no_action() {
        let binding = Binding::keystring("<C-w>w");
        assert_eq!(binding.action(), Action::None);
        assert_eq!(binding.replacement(), Some("<C-w>w"));
        // Only the no-op *action* counts as the empty result
        assert!(!binding.is_none());
    }

    #[test]
    fn test_none_binding() {
        assert!(Binding::NONE.is_none());
    }
}
