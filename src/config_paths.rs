//! Centralized configuration paths for viewkeys
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/viewkeys/`
//! - Windows: `%APPDATA%\viewkeys\`

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "viewkeys";

/// Base config directory for viewkeys
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/viewkeys`
///   - Else: `~/.config/viewkeys`
///
/// Windows:
///   - `%APPDATA%\viewkeys`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/viewkeys/keymap.yaml`
pub fn keymap_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("keymap.yaml"))
}

/// `~/.config/viewkeys/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&logs)?;
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keymap_file_under_config_dir() {
        if let (Some(dir), Some(file)) = (config_dir(), keymap_file()) {
            assert!(file.starts_with(&dir));
            assert!(file.to_string_lossy().ends_with("keymap.yaml"));
        }
    }

    #[test]
    fn test_logs_dir_under_config_dir() {
        if let (Some(dir), Some(logs)) = (config_dir(), logs_dir()) {
            assert!(logs.starts_with(&dir));
        }
    }
}
