//! Multi-view key sequence resolution
//!
//! This module provides the keybinding engine that:
//! - Stores bindings per view in prefix tries
//! - Resolves a typed sequence against an ordered view hierarchy, falling
//!   back to the wildcard view
//! - Tells the input loop whether to execute, remap, wait, or discard
//! - Loads user overrides from YAML keymap files
//!
//! # Architecture
//!
//! ```text
//! backend token → KeySequenceReader::feed() → KeyBindingManager::resolve() → KeyAction
//! ```
//!
//! # Usage
//!
//! ```
//! use viewkeys::keymap::{Action, KeyAction, KeyBindingManager, KeySequenceReader, ViewId};
//!
//! let manager = KeyBindingManager::with_builtin_defaults();
//! let mut reader = KeySequenceReader::new();
//!
//! assert_eq!(reader.feed(&manager, &[ViewId::Main], "g"), KeyAction::AwaitMore);
//! assert_eq!(
//!     reader.feed(&manager, &[ViewId::Main], "g"),
//!     KeyAction::Execute(Action::FirstLine)
//! );
//! ```

mod action;
mod binding;
mod config;
mod defaults;
mod manager;
mod notation;
mod reader;
mod store;
mod view;

pub use action::{Action, UnknownAction};
pub use binding::Binding;
pub use config::{
    apply_user_keymaps, load_keymap_file, parse_keymap_yaml, validate_sequence, KeymapEntry,
    KeymapError, ParsedKeymap,
};
pub use defaults::{DefaultBinding, DefaultTable, PROMPT_TEXT};
pub use manager::{KeyAction, KeyBindingManager, Resolution};
pub use notation::{display_sequence, normalize_sequence, split_tokens, KeyCode, Keystroke, Modifiers};
pub use reader::{KeySequenceReader, MAX_REMAP_DEPTH};
pub use store::{BindingStore, Lookup};
pub use view::ViewId;
