use std::path::Path;
use std::time::Duration;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default bound on a single oracle call.
pub const DEFAULT_ORACLE_TIMEOUT_MS: u64 = 3_000;

/// Options for selecting a reading line out of a longer sentence.
///
/// ```rust
/// use readspell_rs::config::WindowOptionsBuilder;
///
/// let options = WindowOptionsBuilder::default()
///     .preferred_length(4)
///     .occurrence_index(1)
///     .build()?;
/// assert_eq!(options.max_length, 7);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(default, build_fn(validate = "Self::validate"))]
#[serde(default, rename_all = "camelCase")]
pub struct WindowOptions {
    /// Number of words to aim for around the target word.
    pub preferred_length: usize,
    /// The window is extended (at its end) to at least this many words.
    pub min_length: usize,
    /// The window is truncated (at its end) to at most this many words.
    pub max_length: usize,
    /// Which occurrence of the target word to center on (0-based).
    pub occurrence_index: usize,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            preferred_length: 5,
            min_length: 3,
            max_length: 7,
            occurrence_index: 0,
        }
    }
}

impl WindowOptions {
    /// Check the options contract. Returns a description of the first violation.
    pub fn check(&self) -> Result<(), String> {
        check_lengths(self.preferred_length, self.min_length, self.max_length)
    }
}

impl WindowOptionsBuilder {
    fn validate(&self) -> Result<(), String> {
        let defaults = WindowOptions::default();
        check_lengths(
            self.preferred_length.unwrap_or(defaults.preferred_length),
            self.min_length.unwrap_or(defaults.min_length),
            self.max_length.unwrap_or(defaults.max_length),
        )
    }
}

fn check_lengths(preferred: usize, min: usize, max: usize) -> Result<(), String> {
    if preferred == 0 {
        return Err("preferred_length must be at least 1".to_string());
    }
    if max == 0 {
        return Err("max_length must be at least 1".to_string());
    }
    if min > max {
        return Err(format!("min_length ({min}) exceeds max_length ({max})"));
    }
    Ok(())
}

/// Parameters for a finalized line evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EvaluationParams {
    /// Upper bound for one oracle call, in milliseconds. Past it the word is
    /// judged by strict matching.
    pub oracle_timeout_ms: u64,
    /// Issue the per-word oracle calls concurrently. Only enable for oracles
    /// that tolerate concurrent requests. Result order is unaffected.
    pub concurrent: bool,
}

impl Default for EvaluationParams {
    fn default() -> Self {
        Self {
            oracle_timeout_ms: DEFAULT_ORACLE_TIMEOUT_MS,
            concurrent: false,
        }
    }
}

impl EvaluationParams {
    pub fn oracle_timeout(&self) -> Duration {
        Duration::from_millis(self.oracle_timeout_ms)
    }
}

/// Combined reader configuration, typically loaded from a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    pub window: WindowOptions,
    pub evaluation: EvaluationParams,
}

impl ReaderConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn load(config_path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(config_path)?;
        let config = Self::from_json(&content)?;
        log::info!("Loaded reader config from {}", config_path.display());
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.window.check().map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}
