/// Configuration for the HUD alert system.
///
/// Provides:
/// - Pool capacity per style and the wait-for-dismissal timeout
/// - Animation frame interval
/// - How many windows to pre-warm and which stock style the demo uses
/// - Persisting configuration to disk as JSON
///
/// The configuration is saved to and loaded from a `config.json` file located
/// in the platform-specific application data directory
/// (`%APPDATA%/HudAlerts/` on Windows, `~/.local/share/hudalerts/` on Linux).
///
/// # Example
///
/// ```no_run
/// use hud_alerts::config::{load_config, save_config};
///
/// let mut config = load_config();
/// config.prewarm = 2;
/// save_config(&config).expect("Failed to save config");
/// ```
use crate::style::StyleChoice;
use anyhow::{anyhow, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "config.json";

/// Persisted settings for the alert manager
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct HudConfig {
    /// Maximum number of slots per style
    pub capacity: usize,
    /// Safety net for `display_alert_and_wait_until_dismissed`
    pub wait_timeout_ms: u64,
    pub frame_interval_ms: u64,
    /// Slots created per style at startup, 0 disables pre-warming
    pub prewarm: usize,
    pub default_style: StyleChoice,
}

impl Default for HudConfig {
    fn default() -> Self {
        HudConfig {
            capacity: 10,
            wait_timeout_ms: 60_000,
            frame_interval_ms: 16,
            prewarm: 0,
            default_style: StyleChoice::Classic,
        }
    }
}

impl HudConfig {
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }
}

/// Get the application's data directory
/// Creates directory if it doesn't exist
pub fn get_data_directory() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "HudAlerts")
        .ok_or_else(|| anyhow!("Failed to determine user data directory"))?;

    let data_dir = project_dirs.data_dir();

    fs::create_dir_all(data_dir)
        .map_err(|e| anyhow!("Failed to create data directory: {}", e))?;

    Ok(data_dir.to_path_buf())
}

/// Load configuration from config.json
/// Returns default config if file doesn't exist or on error
pub fn load_config() -> HudConfig {
    let Ok(data_dir) = get_data_directory() else {
        return HudConfig::default();
    };
    load_config_from(&data_dir.join(CONFIG_FILE))
}

/// Load configuration from an explicit path, falling back to defaults
pub fn load_config_from(path: &Path) -> HudConfig {
    if !path.exists() {
        return HudConfig::default();
    }

    let Ok(contents) = fs::read_to_string(path) else {
        return HudConfig::default();
    };

    match serde_json::from_str(&contents) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring malformed {}: {}", path.display(), e);
            HudConfig::default()
        }
    }
}

/// Save configuration to config.json
pub fn save_config(config: &HudConfig) -> Result<()> {
    let data_dir = get_data_directory()?;
    save_config_to(config, &data_dir.join(CONFIG_FILE))
}

pub fn save_config_to(config: &HudConfig, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(config)
        .map_err(|e| anyhow!("Failed to serialize config: {}", e))?;

    fs::write(path, json).map_err(|e| anyhow!("Failed to write {}: {}", path.display(), e))?;

    Ok(())
}
