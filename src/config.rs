use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "workforce.toml";

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Debug, Parser)]
#[command(name = "workforce-dashboard")]
#[command(version)]
#[command(about = "Industrial human resource dashboard", long_about = None)]
pub struct Cli {
    /// Workforce table to open on start-up (.csv, .json or .parquet)
    pub data: Option<PathBuf>,

    /// CSV of district coordinates (state, district, latitude, longitude)
    #[arg(long)]
    pub coordinates: Option<PathBuf>,

    /// Configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

// ---------------------------------------------------------------------------
// Config file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub window: WindowConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub path: Option<PathBuf>,
    pub coordinates: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 860.0,
        }
    }
}

impl AppConfig {
    /// Read the TOML file at `path`. A missing file gives the defaults; an
    /// unparsable one is reported and also gives the defaults.
    pub fn load(path: &Path) -> Self {
        let Ok(content) = fs::read_to_string(path) else {
            log::debug!("No config at {}; using defaults", path.display());
            return Self::default();
        };
        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                log::warn!(
                    "Failed to parse {}: {e}. Using defaults.",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// Command-line values take precedence over the file.
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(data) = &cli.data {
            self.data.path = Some(data.clone());
        }
        if let Some(coords) = &cli.coordinates {
            self.data.coordinates = Some(coords.clone());
        }
        self
    }

    pub fn resolve(cli: &Cli) -> Self {
        Self::load(&cli.config).with_cli(cli)
    }
}
