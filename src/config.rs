//! Optional user configuration.
//!
//! Loaded from `$XDG_CONFIG_HOME/capyblocks/config.json` (or the path in
//! `CAPYBLOCKS_CONFIG`). Every field has a default, so a missing or partial
//! file is fine and a malformed one falls back to defaults.

use capy_bar::notify::DEFAULT_TIMEOUT_MS;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_ENV: &str = "CAPYBLOCKS_CONFIG";

/// Block colors (solarized by default).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub normal: String,
    pub info_normal: String,
    pub good: String,
    pub degraded: String,
    pub bad: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            normal: "#586e75".to_string(),
            info_normal: "#839496".to_string(),
            good: "#859900".to_string(),
            degraded: "#b58900".to_string(),
            bad: "#dc322f".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub palette: Palette,
    /// Process name that receives redraw signals.
    pub bar_process: String,
    pub amixer_path: PathBuf,
    pub iwgetid_path: PathBuf,
    pub notify_timeout_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            bar_process: "i3blocks".to_string(),
            amixer_path: PathBuf::from("/usr/bin/amixer"),
            iwgetid_path: PathBuf::from("/sbin/iwgetid"),
            notify_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl Config {
    /// Load from the default location, or return defaults if not found.
    pub fn load_default() -> Self {
        match config_path() {
            Some(path) => Self::load(&path),
            None => Self::default(),
        }
    }

    /// Load from config file, or return defaults if missing or invalid.
    pub fn load(path: &Path) -> Self {
        let Ok(raw) = fs::read_to_string(path) else {
            debug!("No config at {}, using defaults", path.display());
            return Self::default();
        };

        match serde_json::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("Invalid config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Resolve the config file location.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("capyblocks").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("capyblocks-{}-{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load(Path::new("/nonexistent/capyblocks/config.json"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let path = temp_file(
            "partial.json",
            r##"{"bar_process": "i3blocks-next", "palette": {"bad": "#ff0000"}}"##,
        );
        let config = Config::load(&path);
        fs::remove_file(&path).ok();

        assert_eq!(config.bar_process, "i3blocks-next");
        assert_eq!(config.palette.bad, "#ff0000");
        assert_eq!(config.palette.good, Palette::default().good);
        assert_eq!(config.notify_timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let path = temp_file("broken.json", "{ not json");
        let config = Config::load(&path);
        fs::remove_file(&path).ok();

        assert_eq!(config, Config::default());
    }
}
