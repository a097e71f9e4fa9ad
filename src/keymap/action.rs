//! Action enum representing every command a key sequence can resolve to
//!
//! Actions are opaque to the resolution engine: it hands them to whoever
//! owns the input loop, which dispatches them to the focused view.

use std::fmt;
use std::str::FromStr;

/// All application actions that can be bound to key sequences
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    /// No-op sentinel, the result of resolving an unbound sequence
    #[default]
    None,
    /// Quit the program
    Exit,
    /// Open the command prompt
    Prompt,

    // ========================================================================
    // Movement
    // ========================================================================
    /// Move selection down one line
    NextLine,
    /// Move selection up one line
    PrevLine,
    ScrollRight,
    ScrollLeft,
    /// Jump to the first line
    FirstLine,
    /// Jump to the last line
    LastLine,

    /// Activate the selected line
    Select,

    // ========================================================================
    // Views
    // ========================================================================
    /// Move focus to the next view
    NextView,
    /// Move focus to the previous view
    PrevView,
    /// Toggle the focused view filling the screen
    FullScreenView,
}

impl Action {
    /// Every registered action, in declaration order
    pub const ALL: [Action; 13] = [
        Action::None,
        Action::Exit,
        Action::Prompt,
        Action::NextLine,
        Action::PrevLine,
        Action::ScrollRight,
        Action::ScrollLeft,
        Action::FirstLine,
        Action::LastLine,
        Action::Select,
        Action::NextView,
        Action::PrevView,
        Action::FullScreenView,
    ];

    /// Symbolic name used in keymap files and help text
    ///
    /// Names are bracketed so they can never collide with a plain key, and
    /// each one is bound to its action in the wildcard view: a remap can
    /// target an action by writing its name.
    pub const fn name(self) -> &'static str {
        match self {
            Action::None => "<vk-nop>",
            Action::Exit => "<vk-exit>",
            Action::Prompt => "<vk-prompt>",
            Action::NextLine => "<vk-next-line>",
            Action::PrevLine => "<vk-prev-line>",
            Action::ScrollRight => "<vk-scroll-right>",
            Action::ScrollLeft => "<vk-scroll-left>",
            Action::FirstLine => "<vk-first-line>",
            Action::LastLine => "<vk-last-line>",
            Action::Select => "<vk-select>",
            Action::NextView => "<vk-next-view>",
            Action::PrevView => "<vk-prev-view>",
            Action::FullScreenView => "<vk-full-screen-view>",
        }
    }

    /// Short description for help listings
    pub const fn description(self) -> &'static str {
        match self {
            Action::None => "Do nothing",
            Action::Exit => "Exit",
            Action::Prompt => "Open command prompt",
            Action::NextLine => "Move selection down",
            Action::PrevLine => "Move selection up",
            Action::ScrollRight => "Scroll right",
            Action::ScrollLeft => "Scroll left",
            Action::FirstLine => "Go to first line",
            Action::LastLine => "Go to last line",
            Action::Select => "Select line",
            Action::NextView => "Focus next view",
            Action::PrevView => "Focus previous view",
            Action::FullScreenView => "Toggle full screen view",
        }
    }

    /// Whether this is the no-op sentinel
    pub const fn is_none(self) -> bool {
        matches!(self, Action::None)
    }

    /// Whether `name` is a registered symbolic action name
    pub fn is_valid_name(name: &str) -> bool {
        name.parse::<Action>().is_ok()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a symbolic action name is not registered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown action: {}", self.0)
    }
}

impl std::error::Error for UnknownAction {}

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.name() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}
