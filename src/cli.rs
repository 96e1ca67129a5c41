//! Command-line argument parsing
//!
//! Every flag overrides the matching value from the config file.

use clap::Parser;
use std::path::PathBuf;

use crate::config::AppConfig;

/// Draggable swinging dialogs
#[derive(Parser, Debug, Default)]
#[command(name = "dialogs", version, about = "Draggable swinging dialogs")]
pub struct CliArgs {
    /// Number of panels to show
    #[arg(short = 'p', long, value_name = "N")]
    pub panels: Option<usize>,

    /// Seed for panel placement (random when omitted)
    #[arg(short = 's', long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Read configuration from this file instead of the default location
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Initial window width in logical pixels
    #[arg(long, value_name = "W")]
    pub width: Option<u32>,

    /// Initial window height in logical pixels
    #[arg(long, value_name = "H")]
    pub height: Option<u32>,
}

impl CliArgs {
    /// Load the config this invocation points at
    pub fn load_config(&self) -> AppConfig {
        match &self.config {
            Some(path) => AppConfig::load_from(path),
            None => AppConfig::load(),
        }
    }

    /// Apply command-line overrides on top of `config`
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(panels) = self.panels {
            config.panel_count = panels;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(width) = self.width {
            config.window_width = width;
        }
        if let Some(height) = self.height {
            config.window_height = height;
        }
        config.sanitized()
    }
}
