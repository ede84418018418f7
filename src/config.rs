//! Page-level settings.
//!
//! A site can define `window.wmImageZoomSettings` before the module loads to
//! override defaults. Per-block switches stay in CSS custom properties; see
//! [`zoom_core::constants::style_flag`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use zoom_core::CursorPresets;
use zoom_core::constants::{DEFAULT_BLOCK_SELECTORS, page};

/// Log level setting for the module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
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
    /// Convert to log crate's Level.
    pub fn to_level(&self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }

    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        self.to_level().to_level_filter()
    }
}

/// Current settings format version.
/// Increment this when making breaking changes to the settings shape.
pub const CONFIG_VERSION: u32 = 1;

/// Settings read from the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Version of the settings format
    pub version: u32,

    /// Companion stylesheet location
    pub stylesheet_url: String,

    /// Base id of the stylesheet `<link>`; also prefixes the loaded event
    pub stylesheet_id: String,

    /// Blocks scanned for opted-in images
    pub block_selectors: Vec<String>,

    /// Coalesce move updates to one per animation frame
    pub throttle_moves: bool,

    /// Console verbosity
    pub log_level: LogLevel,

    /// Extra cursor presets, merged over the built-in ones
    pub cursors: HashMap<String, String>,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            stylesheet_url: page::STYLESHEET_URL.to_string(),
            stylesheet_id: page::STYLESHEET_ID.to_string(),
            block_selectors: DEFAULT_BLOCK_SELECTORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            throttle_moves: true,
            log_level: LogLevel::default(),
            cursors: HashMap::new(),
        }
    }
}

impl ZoomConfig {
    /// Deserialize settings from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Serialize the settings to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse settings, falling back to defaults on any error.
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        let Some(json) = json else {
            return Self::default();
        };
        match Self::from_json(json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring {}: {}", page::SETTINGS_GLOBAL, e);
                Self::default()
            }
        }
    }

    /// Cursor presets with the configured extras applied.
    pub fn cursor_presets(&self) -> CursorPresets {
        CursorPresets::with_extra(self.cursors.clone())
    }

    /// Selector matching every eligible block not yet processed.
    pub fn unprocessed_blocks_selector(&self) -> String {
        let marker = zoom_core::constants::attribute::BLOCK_PROCESSED;
        self.block_selectors
            .iter()
            .map(|s| format!("{s}:not([{marker}])"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Load settings from `window.wmImageZoomSettings` (WASM only).
    #[cfg(target_arch = "wasm32")]
    pub fn load_from_window() -> Self {
        let json = web_sys::window().and_then(|window| {
            let value = js_sys::Reflect::get(&window, &page::SETTINGS_GLOBAL.into()).ok()?;
            if value.is_undefined() || value.is_null() {
                return None;
            }
            js_sys::JSON::stringify(&value).ok()?.as_string()
        });
        if json.is_none() {
            log::debug!("No {} on window, using defaults", page::SETTINGS_GLOBAL);
        }
        Self::from_json_or_default(json.as_deref())
    }
}

/// Errors that can occur when reading settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse settings: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Settings version is newer than supported
    #[error("Settings version {file_version} is newer than supported version {supported_version}")]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },
}
