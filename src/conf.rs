use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::monitor::MonitorOptions;
use crate::timing::TimingConfig;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Heartbeats per minute
    /// Default is 60
    #[serde(default = "default_beats_per_minute")]
    pub beats_per_minute: f64,

    /// Seconds of trace visible across the surface
    /// Default is 10
    #[serde(default = "default_visible_window_seconds")]
    pub visible_window_seconds: f64,

    /// Surface width in pixels, one sample per column
    #[serde(default = "default_width")]
    pub width: u32,

    /// Surface height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Target frame rate of the render loop
    #[serde(default = "default_frames_per_second")]
    pub frames_per_second: u32,

    /// Draw the diagnostic text overlay
    #[serde(default = "default_true")]
    pub show_overlay: bool,

    /// Mark the newest sample with a small circle
    #[serde(default = "default_true")]
    pub show_cursor: bool,
}

fn default_beats_per_minute() -> f64 {
    60.0
}

fn default_visible_window_seconds() -> f64 {
    10.0
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

fn default_frames_per_second() -> u32 {
    60
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            beats_per_minute: default_beats_per_minute(),
            visible_window_seconds: default_visible_window_seconds(),
            width: default_width(),
            height: default_height(),
            frames_per_second: default_frames_per_second(),
            show_overlay: true,
            show_cursor: true,
        }
    }
}

impl Settings {
    /// Load config from ~/.config/ecg-trace/config.toml
    /// Returns default settings if file doesn't exist or fails to parse
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            log::warn!("Could not determine config directory, using defaults");
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(settings) => {
                    log::info!("Loaded settings from: {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Failed to parse config: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file found at {}, using defaults",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// Save config to ~/.config/ecg-trace/config.toml
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let Some(path) = config_path() else {
            anyhow::bail!("Could not determine config directory");
        };

        // Create parent dir if needed
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml = self.to_toml()?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        log::info!("Saved settings to: {}", path.display());

        Ok(path)
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize settings to TOML")
    }

    pub fn timing(&self) -> TimingConfig {
        TimingConfig::new(self.beats_per_minute, self.visible_window_seconds)
    }

    pub fn monitor_options(&self) -> MonitorOptions {
        MonitorOptions {
            show_overlay: self.show_overlay,
            show_cursor: self.show_cursor,
        }
    }
}

/// Get the path to the config file: ~/.config/ecg-trace/config.toml
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ecg-trace").map(|dirs| dirs.config_dir().join("config.toml"))
}
