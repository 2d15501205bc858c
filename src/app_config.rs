//! Persisted application settings and child profiles.
//!
//! Settings live in `config.json` under the config directory
//! (`$XDG_CONFIG_HOME/albumdl`, falling back to `~/.config/albumdl`).
//! Nothing here is ambient for the core: the download engine receives an
//! explicitly constructed configuration value at call time.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Config file name inside the config directory.
const CONFIG_FILE: &str = "config.json";

/// A stored child profile, captured during login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildProfile {
    /// Child identifier in the remote service.
    pub child_id: u64,
    /// Center (facility) identifier.
    pub center: u64,
    /// Class identifier.
    pub cls: u64,
    /// Display name; may be empty when the capture step could not fetch it.
    #[serde(default)]
    pub name: String,
}

impl ChildProfile {
    /// User-facing label for lists and log lines.
    #[must_use]
    pub fn label(&self, index: usize) -> String {
        if self.name.is_empty() {
            format!("[{index}] child={}", self.child_id)
        } else {
            format!("[{index}] {} (child={})", self.name, self.child_id)
        }
    }

    /// Folder name under the download root: the name when known, the id
    /// otherwise.
    #[must_use]
    pub fn folder_name(&self) -> String {
        if self.name.is_empty() {
            self.child_id.to_string()
        } else {
            self.name.clone()
        }
    }
}

/// Persisted application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Root directory for downloaded media.
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
    /// Child profiles captured during login.
    #[serde(default)]
    pub children: Vec<ChildProfile>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            download_dir: default_download_dir(),
            children: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default config directory.
    ///
    /// A missing or corrupt file degrades to defaults.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&config_dir())
    }

    /// Loads the config from an explicit directory.
    #[must_use]
    pub fn load_from(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE);
        let Ok(raw) = fs::read_to_string(&path) else {
            return Self::default();
        };
        match serde_json::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "config file is malformed, using defaults");
                Self::default()
            }
        }
    }

    /// Persists the config to the default config directory.
    ///
    /// # Errors
    ///
    /// Returns the IO error when the directory or file cannot be written.
    pub fn save(&self) -> io::Result<()> {
        self.save_to(&config_dir())
    }

    /// Persists the config to an explicit directory.
    ///
    /// # Errors
    ///
    /// Returns the IO error when the directory or file cannot be written.
    pub fn save_to(&self, dir: &Path) -> io::Result<()> {
        fs::create_dir_all(dir)?;
        let body = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(dir.join(CONFIG_FILE), body)
    }
}

/// Resolves the config directory.
///
/// `$XDG_CONFIG_HOME/albumdl` when set, otherwise `~/.config/albumdl`,
/// otherwise a relative fallback for environments without a home.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(xdg) = env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg).join("albumdl");
    }
    if let Some(home) = env::var_os("HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(home).join(".config").join("albumdl");
    }
    PathBuf::from(".albumdl")
}

/// Per-child data directory holding the fetched catalog snapshot.
#[must_use]
pub fn child_data_dir(config_dir: &Path, child_id: u64) -> PathBuf {
    config_dir.join("children").join(child_id.to_string())
}

fn default_download_dir() -> PathBuf {
    if let Some(home) = env::var_os("HOME").filter(|v| !v.is_empty()) {
        PathBuf::from(home).join("Pictures").join("albumdl")
    } else {
        PathBuf::from("albumdl")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn profile(child_id: u64, name: &str) -> ChildProfile {
        ChildProfile {
            child_id,
            center: 11,
            cls: 22,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_config_round_trip() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig {
            download_dir: PathBuf::from("/data/albums"),
            children: vec![profile(42, "Mina")],
        };

        config.save_to(temp.path()).unwrap();
        let loaded = AppConfig::load_from(temp.path());
        assert_eq!(loaded.download_dir, PathBuf::from("/data/albums"));
        assert_eq!(loaded.children, config.children);
    }

    #[test]
    fn test_config_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::load_from(temp.path());
        assert!(config.children.is_empty());
    }

    #[test]
    fn test_config_corrupt_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "{ nope").unwrap();
        let config = AppConfig::load_from(temp.path());
        assert!(config.children.is_empty());
    }

    #[test]
    fn test_config_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            r#"{"children": [{"child_id": 7, "center": 1, "cls": 2}]}"#,
        )
        .unwrap();
        let config = AppConfig::load_from(temp.path());
        assert_eq!(config.children.len(), 1);
        assert_eq!(config.children[0].name, "");
    }

    #[test]
    fn test_child_label_with_and_without_name() {
        assert_eq!(profile(42, "Mina").label(0), "[0] Mina (child=42)");
        assert_eq!(profile(42, "").label(3), "[3] child=42");
    }

    #[test]
    fn test_child_folder_name() {
        assert_eq!(profile(42, "Mina").folder_name(), "Mina");
        assert_eq!(profile(42, "").folder_name(), "42");
    }

    #[test]
    fn test_child_data_dir_layout() {
        let dir = child_data_dir(Path::new("/cfg"), 42);
        assert_eq!(dir, PathBuf::from("/cfg/children/42"));
    }
}
