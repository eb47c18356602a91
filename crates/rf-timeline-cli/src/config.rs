//! Analysis configuration.
//!
//! [`AnalysisConfig`] holds every tunable of a run. It starts from the
//! defaults below, can be loaded from a JSON file, and is finally overridden
//! by whatever flags were given on the command line.
//!
//! ```rust
//! use rf_timeline_cli::config::AnalysisConfig;
//!
//! let cfg = AnalysisConfig::default();
//! cfg.validate().expect("default config is valid");
//! assert_eq!(cfg.motif, "wifi5_20,ultra19,wifi6_20");
//! ```

use std::path::Path;

use rf_timeline_signal::DetectorConfig;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default motif searched for.
pub const DEFAULT_MOTIF: &str = "wifi5_20,ultra19,wifi6_20";

/// Complete configuration for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Ultrasonic detection band, threshold and de-duplication spacing.
    pub detector: DetectorConfig,

    /// Seconds added to every acoustic timestamp. `None` estimates the
    /// offset from the first event of each stream.
    pub audio_offset_s: Option<f64>,

    /// Comma-separated three-token motif.
    pub motif: String,

    /// Maximum seconds between consecutive motif steps.
    pub gap_s: f64,

    /// Number of frequent triplets to report; 0 disables mining.
    pub mine_top: usize,

    /// Maximum span of a mined triplet in seconds.
    pub mine_window_s: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            detector: DetectorConfig::default(),
            audio_offset_s: None,
            motif: DEFAULT_MOTIF.to_string(),
            gap_s: 2.0,
            mine_top: 0,
            mine_window_s: 3.0,
        }
    }
}

impl AnalysisConfig {
    /// Load and validate a configuration from a JSON file. Missing fields
    /// take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileRead`] if the file cannot be opened,
    /// [`ConfigError::ParseError`] if the JSON is malformed and
    /// [`ConfigError::InvalidValue`] if a value is out of range.
    pub fn from_json(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: AnalysisConfig =
            serde_json::from_str(&contents).map_err(|source| ConfigError::ParseError {
                path: path.to_path_buf(),
                source,
            })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Write this configuration as pretty-printed JSON.
    pub fn to_json(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::FileRead {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::invalid_value("(serialization)", e.to_string()))?;
        std::fs::write(path, json).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    /// Check every field, returning the first problem found.
    ///
    /// The motif text is not checked here: a malformed motif only skips the
    /// motif search.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.detector
            .validate()
            .map_err(|e| ConfigError::invalid_value("detector", e.to_string()))?;

        if let Some(offset) = self.audio_offset_s {
            if !offset.is_finite() {
                return Err(ConfigError::invalid_value(
                    "audio_offset_s",
                    format!("must be finite, got {offset}"),
                ));
            }
        }
        if !(self.gap_s.is_finite() && self.gap_s >= 0.0) {
            return Err(ConfigError::invalid_value(
                "gap_s",
                format!("must be a non-negative number of seconds, got {}", self.gap_s),
            ));
        }
        if !(self.mine_window_s.is_finite() && self.mine_window_s >= 0.0) {
            return Err(ConfigError::invalid_value(
                "mine_window_s",
                format!(
                    "must be a non-negative number of seconds, got {}",
                    self.mine_window_s
                ),
            ));
        }
        Ok(())
    }
}
