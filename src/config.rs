//! Scenario file support for the simulator.
//!
//! A scenario is a JSON document describing the page (viewport and dropdowns),
//! the log verbosity, and the input steps to replay.

use std::collections::HashSet;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use unidrop_core::AutoClose;
use unidrop_core::constants::DEFAULT_OPEN_CLASS;

use crate::geometry::{Rectangle, Size};
use crate::message::Step;

/// Log level setting for the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current scenario file format version.
/// Increment this when making breaking changes to the format.
pub const CONFIG_VERSION: u32 = 1;

/// A complete scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Version of the scenario file format
    pub version: u32,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Size of the page body
    #[serde(default = "default_viewport")]
    pub viewport: Size,

    /// Dropdowns mounted on the page, in mount order
    pub dropdowns: Vec<DropdownConfig>,

    /// Input to replay
    #[serde(default)]
    pub steps: Vec<Step>,
}

fn default_viewport() -> Size {
    Size::new(800.0, 600.0)
}

/// One dropdown on the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropdownConfig {
    /// Unique name, also used to name its elements
    pub name: String,

    /// Bounds of the toggle button
    pub toggle: Rectangle,

    /// Bounds of the popup menu, if it has one
    #[serde(default)]
    pub menu: Option<Rectangle>,

    /// Class applied to the dropdown container while open
    #[serde(default = "default_open_class")]
    pub open_class: String,

    /// Initial value of the bound open state
    #[serde(default)]
    pub is_open: bool,

    /// Whether the toggle starts disabled
    #[serde(default)]
    pub disabled: bool,

    /// Which clicks dismiss it
    #[serde(default)]
    pub auto_close: AutoClose,
}

fn default_open_class() -> String {
    DEFAULT_OPEN_CLASS.to_string()
}

impl SimConfig {
    /// Parse and validate a scenario from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        let mut seen = HashSet::new();
        for dropdown in &config.dropdowns {
            if !seen.insert(dropdown.name.as_str()) {
                return Err(ConfigError::DuplicateDropdown(dropdown.name.clone()));
            }
        }

        Ok(config)
    }

    /// Load a scenario from a file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded scenario from {:?}: {} dropdowns, {} steps",
            path,
            config.dropdowns.len(),
            config.steps.len()
        );
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Errors that can occur when loading a scenario.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse scenario: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Scenario version is newer than supported
    #[error(
        "Scenario file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// Two dropdowns share a name
    #[error("Duplicate dropdown name: {0}")]
    DuplicateDropdown(String),

    /// I/O error when reading the scenario
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
