//! Built-in keybindings
//!
//! The default table seeds every manager before any keymap file is applied,
//! and answers "which keys trigger this action here" for help text.

use std::collections::BTreeMap;

use super::action::Action;
use super::view::ViewId;

/// Key typed to open the command prompt
pub const PROMPT_TEXT: &str = ":";

/// One row of the default table: an action's keys in one view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultBinding {
    pub action: Action,
    pub view: ViewId,
    pub keys: Vec<String>,
}

/// Catalogue of factory-installed bindings
#[derive(Debug, Clone, Default)]
pub struct DefaultTable {
    entries: BTreeMap<(Action, ViewId), Vec<String>>,
}

impl DefaultTable {
    /// An empty table, for managers that start without defaults
    pub fn empty() -> Self {
        Self::default()
    }

    /// The table that ships with the program
    pub fn builtin() -> Self {
        let mut table = Self::empty();

        // ====================================================================
        // Prompt
        // ====================================================================
        table.add(Action::Prompt, ViewId::Main, &[PROMPT_TEXT]);

        // ====================================================================
        // Movement
        // ====================================================================
        table.add(Action::PrevLine, ViewId::All, &["<Up>", "k"]);
        table.add(Action::NextLine, ViewId::All, &["<Down>", "j"]);
        table.add(Action::ScrollRight, ViewId::All, &["<Right>", "l"]);
        table.add(Action::ScrollLeft, ViewId::All, &["<Left>", "h"]);
        table.add(Action::FirstLine, ViewId::All, &["gg"]);
        table.add(Action::LastLine, ViewId::All, &["G"]);

        // ====================================================================
        // Views
        // ====================================================================
        table.add(Action::NextView, ViewId::All, &["<Tab>", "<C-w>w", "<C-w><C-w>"]);
        table.add(Action::PrevView, ViewId::All, &["<S-Tab>", "<C-w>W"]);
        table.add(Action::FullScreenView, ViewId::All, &["f", "<C-w>o", "<C-w><C-o>"]);

        table.add(Action::Select, ViewId::All, &["<Enter>"]);
        table.add(Action::Exit, ViewId::All, &["q"]);

        table
    }

    /// Append keys for an action in a view
    pub fn add(&mut self, action: Action, view: ViewId, keys: &[&str]) {
        self.entries
            .entry((action, view))
            .or_default()
            .extend(keys.iter().map(|k| k.to_string()));
    }

    /// Default trigger sequences for `action` in `view`
    ///
    /// A view-specific entry hides the wildcard one; with neither, the
    /// action has no default keys.
    pub fn default_keys(&self, action: Action, view: ViewId) -> &[String] {
        self.entries
            .get(&(action, view))
            .or_else(|| self.entries.get(&(action, ViewId::All)))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every row of the table, ordered by action then view
    pub fn iter(&self) -> impl Iterator<Item = DefaultBinding> + '_ {
        self.entries
            .iter()
            .map(|(&(action, view), keys)| DefaultBinding {
                action,
                view,
                keys: keys.clone(),
            })
    }

    /// Help listing for one view: each action with its effective keys
    pub fn help_entries(&self, view: ViewId) -> Vec<(Action, &[String])> {
        Action::ALL
            .into_iter()
            .map(|action| (action, self.default_keys(action, view)))
            .filter(|(_, keys)| !keys.is_empty())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
