//! YAML configuration parsing for keymaps
//!
//! Parses keymap.yaml files into per-view bindings and installs them on a
//! manager. Bad entries are rejected one by one; the rest still apply.

use std::path::Path;

use serde::Deserialize;

use super::action::Action;
use super::binding::Binding;
use super::manager::KeyBindingManager;
use super::notation::{normalize_sequence, split_tokens, Keystroke};
use super::view::ViewId;

/// Root structure of a keymap YAML file
#[derive(Debug, Deserialize)]
pub struct KeymapConfig {
    #[serde(default)]
    pub bindings: Vec<BindingConfig>,
}

/// A single binding entry from YAML
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BindingConfig {
    #[serde(default)]
    pub view: Option<String>,
    pub keys: String,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub remap: Option<String>,
}

/// A validated keymap entry, ready to install
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeymapEntry {
    pub view: ViewId,
    pub keys: String,
    pub binding: Binding,
}

/// Result of parsing a keymap file
#[derive(Debug, Default)]
pub struct ParsedKeymap {
    /// Entries that passed validation, in file order
    pub entries: Vec<KeymapEntry>,
    /// One error per rejected entry
    pub rejected: Vec<KeymapError>,
}

impl ParsedKeymap {
    /// Install every valid entry, later entries overriding earlier ones
    pub fn apply(&self, manager: &mut KeyBindingManager) {
        for entry in &self.entries {
            match &entry.binding {
                Binding::Action(action) => {
                    manager.set_action_binding(entry.view, &entry.keys, *action)
                }
                Binding::Keystring(mapped) => {
                    manager.set_keystring_binding(entry.view, &entry.keys, mapped)
                }
            }
        }
    }
}

/// Load keybindings from a YAML file
pub fn load_keymap_file(path: &Path) -> Result<ParsedKeymap, KeymapError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeymapError::IoError(e.to_string()))?;

    parse_keymap_yaml(&content)
}

/// Parse keybindings from YAML string
///
/// Fails only when the document itself is malformed; invalid entries end up
/// in [`ParsedKeymap::rejected`].
pub fn parse_keymap_yaml(yaml: &str) -> Result<ParsedKeymap, KeymapError> {
    // An empty file is a valid, empty keymap
    if yaml.trim().is_empty() {
        return Ok(ParsedKeymap::default());
    }

    let config: KeymapConfig =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))?;

    let mut parsed = ParsedKeymap::default();
    for (index, entry) in config.bindings.into_iter().enumerate() {
        match parse_entry(entry) {
            Ok(entry) => parsed.entries.push(entry),
            Err(e) => {
                tracing::warn!("Rejected keymap entry #{}: {}", index + 1, e);
                parsed.rejected.push(e);
            }
        }
    }

    Ok(parsed)
}

fn parse_entry(entry: BindingConfig) -> Result<KeymapEntry, KeymapError> {
    let view = match entry.view.as_deref() {
        Some(name) => name.parse()?,
        None => ViewId::All,
    };

    validate_sequence(&entry.keys)?;

    let binding = match (entry.action, entry.remap) {
        (Some(name), None) => Binding::Action(
            name.parse::<Action>()
                .map_err(|_| KeymapError::InvalidAction(name))?,
        ),
        (None, Some(mapped)) => {
            validate_sequence(&mapped)?;
            Binding::Keystring(normalize_sequence(&mapped))
        }
        (Some(_), Some(_)) => {
            return Err(KeymapError::InvalidEntry(format!(
                "{}: has both action and remap",
                entry.keys
            )))
        }
        (None, None) => {
            return Err(KeymapError::InvalidEntry(format!(
                "{}: needs an action or a remap",
                entry.keys
            )))
        }
    };

    Ok(KeymapEntry {
        view,
        keys: normalize_sequence(&entry.keys),
        binding,
    })
}

/// Check that a key sequence is non-empty and every bracketed token in it
/// names a key or an action
pub fn validate_sequence(sequence: &str) -> Result<(), KeymapError> {
    if sequence.is_empty() {
        return Err(KeymapError::InvalidKey("empty key sequence".to_string()));
    }

    for token in split_tokens(sequence) {
        let bracketed = token.len() > 1 && token.starts_with('<');
        if bracketed && !Action::is_valid_name(token) {
            Keystroke::parse_token(token)?;
        }
    }

    Ok(())
}

/// Apply the project-local and user keymap files on top of `manager`
///
/// Loading order (each layer overrides the previous):
/// 1. keymap.yaml in current directory (project-local overrides)
/// 2. User config at ~/.config/viewkeys/keymap.yaml
///
/// Returns every rejected entry and unreadable file.
pub fn apply_user_keymaps(manager: &mut KeyBindingManager) -> Vec<KeymapError> {
    let mut paths = vec![Path::new("keymap.yaml").to_path_buf()];
    if let Some(user_path) = crate::config_paths::keymap_file() {
        paths.push(user_path);
    }

    let mut errors = Vec::new();
    for path in paths.iter().filter(|p| p.exists()) {
        match load_keymap_file(path) {
            Ok(parsed) => {
                tracing::info!(
                    "Applying keymap from {} ({} bindings, {} rejected)",
                    path.display(),
                    parsed.entries.len(),
                    parsed.rejected.len()
                );
                parsed.apply(manager);
                errors.extend(parsed.rejected);
            }
            Err(e) => {
                tracing::warn!("Failed to load keymap from {}: {}", path.display(), e);
                errors.push(e);
            }
        }
    }

    errors
}

/// Errors that can occur when parsing keymaps
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeymapError {
    IoError(String),
    ParseError(String),
    InvalidKey(String),
    InvalidAction(String),
    InvalidView(String),
    InvalidEntry(String),
}

impl std::fmt::Display for KeymapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapError::IoError(e) => write!(f, "IO error: {}", e),
            KeymapError::ParseError(e) => write!(f, "Parse error: {}", e),
            KeymapError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
            KeymapError::InvalidAction(a) => write!(f, "Invalid action: {}", a),
            KeymapError::InvalidView(v) => write!(f, "Invalid view: {}", v),
            KeymapError::InvalidEntry(e) => write!(f, "Invalid entry: {}", e),
        }
    }
}

impl std::error::Error for KeymapError {}
