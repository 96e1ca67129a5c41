//! Application configuration persistence
//!
//! Stores user preferences in `~/.config/dialogs/config.yaml`. Every field has
//! a default, so a partial file (or none at all) is valid.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::canvas::Shadow;
use crate::color::Color;
use crate::panel::DialogStyle;
use crate::scene::SceneStyle;

/// Configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Initial window size in logical pixels
    pub window_width: u32,
    pub window_height: u32,

    /// Number of dialog panels (at least one)
    pub panel_count: usize,
    pub panel_width: f64,
    pub panel_height: f64,
    /// Panel fill colours, cycled when there are more panels than colours
    pub panel_colors: Vec<Color>,

    pub background: Color,
    /// Drag guide colour
    pub accent: Color,
    pub guide_radius: f64,
    pub line_width: f64,
    /// Drop shadow under panels and guide circles; `null` disables it
    pub shadow: Option<Shadow>,

    pub follow_speed: f64,
    pub rotate_speed: f64,
    /// Maximum swing in degrees
    pub max_angle: f64,

    /// Fixed seed for panel placement; random per run when unset
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let dialog = DialogStyle::default();
        let scene = SceneStyle::default();
        Self {
            window_width: 800,
            window_height: 600,
            panel_count: 3,
            panel_width: dialog.width,
            panel_height: dialog.height,
            panel_colors: vec![dialog.color],
            background: Color::WHITE,
            accent: scene.accent,
            guide_radius: scene.guide_radius,
            line_width: scene.line_width,
            shadow: scene.shadow,
            follow_speed: dialog.follow_speed,
            rotate_speed: dialog.rotate_speed,
            max_angle: dialog.max_angle,
            seed: None,
        }
    }
}

impl AppConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<AppConfig>(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config.sanitized()
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let path = crate::config_paths::config_file().context("No config directory available")?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Clamp values into their usable ranges
    ///
    /// Non-finite numbers (`.nan`, `.inf` in YAML) are replaced by their
    /// defaults before clamping.
    pub fn sanitized(mut self) -> Self {
        let defaults = AppConfig::default();

        self.panel_count = self.panel_count.max(1);
        self.window_width = self.window_width.max(1);
        self.window_height = self.window_height.max(1);
        self.panel_width = finite_or(self.panel_width, defaults.panel_width).max(1.0);
        self.panel_height = finite_or(self.panel_height, defaults.panel_height).max(1.0);
        self.follow_speed = finite_or(self.follow_speed, defaults.follow_speed).clamp(0.0, 1.0);
        self.rotate_speed = finite_or(self.rotate_speed, defaults.rotate_speed).clamp(0.0, 1.0);
        self.max_angle = finite_or(self.max_angle, defaults.max_angle);
        self.guide_radius = finite_or(self.guide_radius, defaults.guide_radius).max(0.0);
        self.line_width = finite_or(self.line_width, defaults.line_width).max(0.0);
        if let Some(shadow) = &mut self.shadow {
            let fallback = Shadow::default();
            shadow.offset_x = finite_or(shadow.offset_x, fallback.offset_x);
            shadow.offset_y = finite_or(shadow.offset_y, fallback.offset_y);
            shadow.blur = finite_or(shadow.blur, fallback.blur).max(0.0);
        }
        if self.panel_colors.is_empty() {
            self.panel_colors = defaults.panel_colors;
        }
        self
    }

    /// Style for the panel at creation index `index`
    pub fn dialog_style(&self, index: usize) -> DialogStyle {
        let color = if self.panel_colors.is_empty() {
            DialogStyle::default().color
        } else {
            self.panel_colors[index % self.panel_colors.len()]
        };
        DialogStyle {
            width: self.panel_width,
            height: self.panel_height,
            color,
            follow_speed: self.follow_speed,
            rotate_speed: self.rotate_speed,
            max_angle: self.max_angle,
        }
    }

    pub fn scene_style(&self) -> SceneStyle {
        SceneStyle {
            accent: self.accent,
            guide_radius: self.guide_radius,
            line_width: self.line_width,
            shadow: self.shadow,
        }
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}
