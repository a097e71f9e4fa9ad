//! KeyBindingManager: per-view binding stores and sequence resolution

use std::collections::HashMap;

use super::action::Action;
use super::binding::Binding;
use super::config::KeymapError;
use super::defaults::DefaultTable;
use super::store::BindingStore;
use super::view::ViewId;

/// What the caller should do with the sequence typed so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Execute this action, then clear the buffer
    Execute(Action),
    /// Feed this replacement sequence back in, then clear the buffer
    Remap(String),
    /// Sequence is a prefix of a longer binding, await more input
    AwaitMore,
    /// Nothing matches, discard the buffer
    NoMatch,
}

/// Result of resolving one sequence against a view hierarchy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The matched binding, or the no-op action binding on a miss
    pub binding: Binding,
    /// Whether the sequence could still grow into a longer binding
    ///
    /// Also set on an exact hit when the matched view binds longer
    /// sequences under it, so `g` reports `true` while `gg` exists. A plain
    /// first-match lookup would report `false` for every exact hit.
    pub is_prefix: bool,
}

impl Resolution {
    fn miss(is_prefix: bool) -> Self {
        Self {
            binding: Binding::NONE,
            is_prefix,
        }
    }

    /// Classify this resolution for an input loop
    ///
    /// An exact binding always wins over waiting, even when it is also a
    /// prefix of something longer.
    pub fn verdict(&self) -> KeyAction {
        match &self.binding {
            Binding::Keystring(keys) => KeyAction::Remap(keys.clone()),
            Binding::Action(action) if !action.is_none() => KeyAction::Execute(*action),
            Binding::Action(_) if self.is_prefix => KeyAction::AwaitMore,
            Binding::Action(_) => KeyAction::NoMatch,
        }
    }
}

/// Owns every view's bindings and resolves typed sequences against them
///
/// Stores are created lazily the first time a view receives a binding.
/// Lookups and installs are plain in-memory operations; a program that
/// rebinds from another thread wraps the manager in a `Mutex`.
#[derive(Debug, Clone, Default)]
pub struct KeyBindingManager {
    bindings: HashMap<ViewId, BindingStore>,
}

impl KeyBindingManager {
    /// A manager with no bindings at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// A manager seeded from `defaults`
    ///
    /// Every action name is first bound to its action in the wildcard view,
    /// then each default row is installed.
    pub fn new(defaults: &DefaultTable) -> Self {
        let mut manager = Self::empty();

        for action in Action::ALL {
            manager.set_action_binding(ViewId::All, action.name(), action);
        }

        for row in defaults.iter() {
            for key in &row.keys {
                manager.set_action_binding(row.view, key, row.action);
            }
        }

        tracing::debug!(
            views = manager.bindings.len(),
            bindings = manager.len(),
            "Seeded key binding manager"
        );
        manager
    }

    /// A manager seeded with the built-in defaults
    pub fn with_builtin_defaults() -> Self {
        Self::new(&DefaultTable::builtin())
    }

    /// Resolve `sequence` against `hierarchy`, most specific view first
    ///
    /// The wildcard view is always consulted last. The first view holding
    /// an exact binding wins, and its own longer bindings decide
    /// `is_prefix`. Without any exact binding the result is the no-op
    /// action, flagged as a prefix if any view had a longer binding.
    pub fn resolve(&self, hierarchy: &[ViewId], sequence: &str) -> Resolution {
        let mut is_prefix = false;

        let scopes = hierarchy.iter().copied().chain(std::iter::once(ViewId::All));
        for view in scopes {
            let Some(store) = self.bindings.get(&view) else {
                continue;
            };

            let lookup = store.lookup(sequence);
            if let Some(binding) = lookup.binding {
                tracing::trace!(%view, sequence, ?binding, "Exact key binding match");
                return Resolution {
                    binding: binding.clone(),
                    is_prefix: lookup.has_longer,
                };
            }
            is_prefix |= lookup.has_longer;
        }

        tracing::trace!(sequence, is_prefix, "No exact key binding match");
        Resolution::miss(is_prefix)
    }

    /// Bind `sequence` to `action` in `view`, replacing any prior binding
    pub fn set_action_binding(&mut self, view: ViewId, sequence: &str, action: Action) {
        self.install(view, sequence, Binding::Action(action));
    }

    /// Bind `sequence` to the replacement `mapped` in `view`
    pub fn set_keystring_binding(&mut self, view: ViewId, sequence: &str, mapped: &str) {
        self.install(view, sequence, Binding::keystring(mapped));
    }

    /// Bind `sequence` to the action registered as `name`
    ///
    /// Unknown names are rejected and leave the existing bindings untouched.
    pub fn set_named_binding(
        &mut self,
        view: ViewId,
        sequence: &str,
        name: &str,
    ) -> Result<(), KeymapError> {
        let action = name
            .parse::<Action>()
            .map_err(|_| KeymapError::InvalidAction(name.to_string()))?;
        self.set_action_binding(view, sequence, action);
        Ok(())
    }

    fn install(&mut self, view: ViewId, sequence: &str, binding: Binding) {
        tracing::debug!(%view, sequence, ?binding, "Installing key binding");
        self.bindings.entry(view).or_default().insert(sequence, binding);
    }

    /// The store for `view`, if anything was ever bound there
    pub fn store(&self, view: ViewId) -> Option<&BindingStore> {
        self.bindings.get(&view)
    }

    /// Every binding installed directly in `view`, sorted by sequence
    pub fn bindings_for(&self, view: ViewId) -> Vec<(String, &Binding)> {
        self.store(view).map(BindingStore::entries).unwrap_or_default()
    }

    /// Total number of bound sequences across all views
    pub fn len(&self) -> usize {
        self.bindings.values().map(BindingStore::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
