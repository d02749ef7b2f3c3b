//! Configuration types for legacy-admin.
//!
//! [`Config::load`] reads `~/.config/legacy-admin/config.toml`, creating it
//! with hardcoded defaults if it does not yet exist. [`Config::defaults`]
//! returns the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[ui]
filter_pane_width_pct = 28
show_stats            = true
theme                 = "default"

[store]
# Empty means $XDG_DATA_HOME/legacy-admin (or ~/.local/share/legacy-admin).
dir              = ""
poll_interval_ms = 1000
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_filter_pane_width_pct")]
    pub filter_pane_width_pct: u16,
    #[serde(default = "default_show_stats")]
    pub show_stats: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_filter_pane_width_pct() -> u16 { 28 }
fn default_show_stats() -> bool { true }
fn default_theme() -> String { "default".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            filter_pane_width_pct: default_filter_pane_width_pct(),
            show_stats: default_show_stats(),
            theme: default_theme(),
        }
    }
}

/// `[store]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub dir: String,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_poll_interval_ms() -> u64 { 1000 }

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: String::new(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl StoreConfig {
    /// The configured store directory, or the platform data directory when
    /// none is set.
    pub fn resolved_dir(&self) -> PathBuf {
        if self.dir.trim().is_empty() {
            data_dir()
        } else {
            PathBuf::from(self.dir.trim())
        }
    }

    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.poll_interval_ms.max(50))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/legacy-admin/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(path)
    }

    /// Load from an explicit path layered over the defaults. A missing file
    /// yields the defaults.
    pub fn load_from(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn home() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
}

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home().join(".config"))
        .join("legacy-admin")
        .join("config.toml")
}

fn data_dir() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home().join(".local").join("share"))
        .join("legacy-admin")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert_eq!(cfg.ui.filter_pane_width_pct, 28);
        assert!(cfg.ui.show_stats);
        assert_eq!(cfg.ui.theme, "default");
        assert_eq!(cfg.store.poll_interval_ms, 1000);
        assert!(cfg.store.dir.is_empty());
    }

    #[test]
    fn poll_interval_has_a_floor() {
        let store = StoreConfig { dir: String::new(), poll_interval_ms: 0 };
        assert_eq!(store.poll_interval(), std::time::Duration::from_millis(50));
    }

    #[test]
    fn explicit_dir_wins() {
        let store = StoreConfig { dir: " /tmp/admin ".into(), poll_interval_ms: 10 };
        assert_eq!(store.resolved_dir(), PathBuf::from("/tmp/admin"));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = Config::load_from("/nonexistent/legacy-admin/config.toml").unwrap();
        assert_eq!(cfg.ui.filter_pane_width_pct, 28);
    }
}
