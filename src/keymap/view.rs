//! View identifiers and the wildcard scope

use std::fmt;
use std::str::FromStr;

use super::config::KeymapError;

/// One addressable view of the program, or the `All` wildcard
///
/// Bindings installed for `All` are consulted last on every lookup,
/// after every view the caller listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewId {
    /// Wildcard scope applied to every view
    All,
    /// Top-level container holding the other views
    Main,
    /// Commit history panel
    History,
    /// Branch and tag list panel
    RefList,
    /// Commit list panel
    CommitList,
    /// Diff detail panel
    Diff,
}

impl ViewId {
    /// Every view, wildcard first
    pub const ALL: [ViewId; 6] = [
        ViewId::All,
        ViewId::Main,
        ViewId::History,
        ViewId::RefList,
        ViewId::CommitList,
        ViewId::Diff,
    ];

    /// Name used in keymap files and on the command line
    pub const fn name(self) -> &'static str {
        match self {
            ViewId::All => "all",
            ViewId::Main => "main",
            ViewId::History => "history",
            ViewId::RefList => "ref-list",
            ViewId::CommitList => "commit-list",
            ViewId::Diff => "diff",
        }
    }

    pub const fn is_wildcard(self) -> bool {
        matches!(self, ViewId::All)
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ViewId {
    type Err = KeymapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        ViewId::ALL
            .into_iter()
            .find(|view| view.name() == lower)
            .ok_or_else(|| KeymapError::InvalidView(s.to_string()))
    }
}
