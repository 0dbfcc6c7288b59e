//! TOML Configuration File Support
//!
//! Centralized configuration loading for the companion, with an optional TOML
//! file at `~/.config/cocktail-companion/config.toml`.
//!
//! # Configuration Priority
//!
//! Values are applied in the following order (highest first):
//! 1. CLI arguments (via [`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [backend]
//! endpoint = "https://cocktails.example/api/generate"
//! connect_timeout_ms = 5000
//! channel_capacity = 100
//!
//! [display]
//! toast_duration_ms = 2000
//! generated_count = 47118
//! headline = "Host your next cocktail night with AI"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Endpoint used when nothing else is configured
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/generate";

/// Page headline used when nothing else is configured
pub const DEFAULT_HEADLINE: &str = "Host your next cocktail night with AI";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where configuration values came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// `[backend]` section of the TOML file
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendToml {
    /// Generation endpoint URL
    pub endpoint: Option<String>,
    /// Connect timeout in milliseconds
    pub connect_timeout_ms: Option<u64>,
    /// Chunk channel capacity
    pub channel_capacity: Option<usize>,
}

/// `[display]` section of the TOML file
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayToml {
    /// How long toasts stay on screen
    pub toast_duration_ms: Option<u64>,
    /// Static "cocktails generated so far" figure
    pub generated_count: Option<u64>,
    /// Page headline
    pub headline: Option<String>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanionToml {
    /// Backend section
    pub backend: BackendToml,
    /// Display section
    pub display: DisplayToml,
}

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Settings for reaching the generation endpoint
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendSettings {
    /// Generation endpoint URL
    pub endpoint: String,
    /// Connect timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Chunk channel capacity
    pub channel_capacity: usize,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout_ms: 10_000,
            channel_capacity: 100,
        }
    }
}

/// Settings that shape what surfaces show
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplaySettings {
    /// How long toasts stay on screen
    pub toast_duration_ms: u64,
    /// Static "cocktails generated so far" figure (read-only, never updated)
    pub generated_count: u64,
    /// Page headline
    pub headline: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            toast_duration_ms: 2000,
            generated_count: 47_118,
            headline: DEFAULT_HEADLINE.to_string(),
        }
    }
}

/// Centralized configuration for the companion
#[derive(Clone, Debug, Default)]
pub struct CompanionConfig {
    /// Backend settings
    pub backend: BackendSettings,
    /// Display settings
    pub display: DisplaySettings,
    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,
    /// Highest-priority source that contributed a value
    source: ConfigSource,
}

impl Default for ConfigSource {
    fn default() -> Self {
        Self::Default
    }
}

impl CompanionConfig {
    /// Create a configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Check values that would otherwise fail later and far from their origin
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for an empty or non-HTTP
    /// endpoint, or a zero channel capacity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.backend.endpoint.trim();
        if endpoint.is_empty() {
            return Err(ConfigError::ValidationError(
                "backend.endpoint must not be empty".to_string(),
            ));
        }
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "backend.endpoint must be an http(s) URL, got {endpoint:?}"
            )));
        }
        if self.backend.channel_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "backend.channel_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/cocktail-companion/config.toml` or the platform
/// equivalent.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("cocktail-companion").join("config.toml"))
}

/// Load configuration from the default path, then the environment
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be read, parsed, or
/// validated. A missing config file is not an error.
pub fn load_config() -> Result<CompanionConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path, then the environment
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed, or if
/// the resulting configuration is invalid.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<CompanionConfig, ConfigError> {
    let mut config = CompanionConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: CompanionToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config);
    config.validate()?;

    Ok(config)
}

/// Apply TOML values to the config struct
fn apply_toml_config(config: &mut CompanionConfig, toml: &CompanionToml) {
    if let Some(ref endpoint) = toml.backend.endpoint {
        config.backend.endpoint = endpoint.clone();
    }
    if let Some(timeout) = toml.backend.connect_timeout_ms {
        config.backend.connect_timeout_ms = timeout;
    }
    if let Some(capacity) = toml.backend.channel_capacity {
        config.backend.channel_capacity = capacity;
    }

    if let Some(duration) = toml.display.toast_duration_ms {
        config.display.toast_duration_ms = duration;
    }
    if let Some(count) = toml.display.generated_count {
        config.display.generated_count = count;
    }
    if let Some(ref headline) = toml.display.headline {
        config.display.headline = headline.clone();
    }
}

/// Apply environment variable overrides
fn apply_env_config(config: &mut CompanionConfig) {
    if let Ok(endpoint) = std::env::var("COCKTAIL_ENDPOINT") {
        if !endpoint.trim().is_empty() {
            config.backend.endpoint = endpoint;
            config.source = ConfigSource::Env;
        }
    }
    if let Ok(timeout) = std::env::var("COCKTAIL_CONNECT_TIMEOUT_MS") {
        match timeout.parse::<u64>() {
            Ok(ms) => {
                config.backend.connect_timeout_ms = ms;
                config.source = ConfigSource::Env;
            }
            Err(_) => {
                tracing::warn!(value = %timeout, "Ignoring unparsable COCKTAIL_CONNECT_TIMEOUT_MS");
            }
        }
    }
    if let Ok(toast) = std::env::var("COCKTAIL_TOAST_MS") {
        match toast.parse::<u64>() {
            Ok(ms) => {
                config.display.toast_duration_ms = ms;
                config.source = ConfigSource::Env;
            }
            Err(_) => {
                tracing::warn!(value = %toast, "Ignoring unparsable COCKTAIL_TOAST_MS");
            }
        }
    }
}

// =============================================================================
// CLI Overrides
// =============================================================================

/// Overrides collected from command-line arguments
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Generation endpoint
    pub endpoint: Option<String>,
    /// Toast duration in milliseconds
    pub toast_duration_ms: Option<u64>,
}

impl ConfigOverrides {
    /// Create empty overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the endpoint
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Override the toast duration
    #[must_use]
    pub fn with_toast_duration_ms(mut self, ms: u64) -> Self {
        self.toast_duration_ms = Some(ms);
        self
    }

    /// Apply overrides on top of a loaded configuration
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if an override makes the
    /// configuration invalid.
    pub fn apply(&self, config: &mut CompanionConfig) -> Result<(), ConfigError> {
        let mut changed = false;

        if let Some(ref endpoint) = self.endpoint {
            config.backend.endpoint = endpoint.clone();
            changed = true;
        }
        if let Some(ms) = self.toast_duration_ms {
            config.display.toast_duration_ms = ms;
            changed = true;
        }

        if changed {
            config.source = ConfigSource::Cli;
        }
        config.validate()
    }
}
