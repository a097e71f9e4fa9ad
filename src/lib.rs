//! viewkeys - key sequence resolution for multi-view terminal programs
//!
//! This crate provides the keybinding engine of an interactive terminal
//! program: per-view binding stores, priority resolution across a view
//! hierarchy, built-in defaults, and YAML keymap overrides.

pub mod cli;
pub mod config_paths;
pub mod keymap;
pub mod tracing;

// Re-export commonly used types
pub use keymap::{Action, Binding, KeyAction, KeyBindingManager, KeySequenceReader, ViewId};
