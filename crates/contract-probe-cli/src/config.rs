// crates/contract-probe-cli/src/config.rs
// ============================================================================
// Module: Probe Configuration
// Description: TOML configuration model with fail-closed load guards.
// Purpose: Resolve target and report settings for a suite run.
// Dependencies: contract-probe-core, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! The probe reads an optional TOML file resolving the target base URL,
//! transport limits, and the report directory. Loading is strict and
//! fail-closed: oversized files, non-UTF-8 content, unknown fields, and
//! invalid field values are all rejected with a diagnostic rather than
//! defaulted away. Absent settings fall back to the canonical target.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use contract_probe_core::RequestSpecBuilder;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Defaults and Limits
// ============================================================================

/// Canonical target when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://reqres.in/";

/// Default configuration file name probed in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "contract-probe.toml";

/// Hard upper bound on configuration file size, in bytes.
const MAX_CONFIG_BYTES: u64 = 1024 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config `{path}`: {reason}")]
    Read {
        /// Rejected path.
        path: String,
        /// Underlying cause.
        reason: String,
    },
    /// The configuration file exceeds the size limit.
    #[error("config file exceeds size limit of {limit} bytes")]
    TooLarge {
        /// Enforced limit in bytes.
        limit: u64,
    },
    /// The configuration file is not valid UTF-8.
    #[error("config file must be utf-8")]
    NotUtf8,
    /// The configuration file is not valid TOML for this schema.
    #[error("config parse failed: {reason}")]
    Parse {
        /// Parser diagnostic.
        reason: String,
    },
    /// A configuration value failed validation.
    #[error("invalid config: {reason}")]
    Invalid {
        /// Validation diagnostic.
        reason: String,
    },
}

// ============================================================================
// SECTION: Model
// ============================================================================

/// Root configuration document.
///
/// # Invariants
/// - Unknown fields are rejected at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
    /// Target resource settings.
    #[serde(default)]
    pub target: TargetConfig,
    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Target resource settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    /// Base URL of the users resource.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Allow cleartext HTTP targets.
    #[serde(default)]
    pub allow_http: bool,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            allow_http: false,
        }
    }
}

/// Report settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Directory receiving raw response attachments; in-memory only when
    /// unset.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

/// Returns the canonical base URL.
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Returns the default request timeout.
const fn default_timeout_ms() -> u64 {
    10_000
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl ProbeConfig {
    /// Loads configuration from an explicit path, or from the default file
    /// when present, or falls back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an explicit path cannot be loaded or any
    /// present file fails a guard or validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load_file(path);
        }
        let default = Path::new(DEFAULT_CONFIG_FILE);
        if default.is_file() {
            return Self::load_file(default);
        }
        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates one configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, exceeds the
    /// size limit, is not UTF-8, fails to parse, or fails validation.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let metadata = fs::metadata(path).map_err(|err| ConfigError::Read {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        if metadata.len() > MAX_CONFIG_BYTES {
            return Err(ConfigError::TooLarge {
                limit: MAX_CONFIG_BYTES,
            });
        }
        let bytes = fs::read(path).map_err(|err| ConfigError::Read {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        let text = String::from_utf8(bytes).map_err(|_| ConfigError::NotUtf8)?;
        let config: Self = toml::from_str(&text).map_err(|err| ConfigError::Parse {
            reason: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validates resolved values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the base URL is not a usable request
    /// base or the timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        RequestSpecBuilder::new(self.target.base_url.clone()).build().map_err(|err| {
            ConfigError::Invalid {
                reason: err.to_string(),
            }
        })?;
        if self.target.timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                reason: "timeout_ms must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
