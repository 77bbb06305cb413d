//! Configuration for the consensus extractor

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the consensus extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusConfig {
    /// Number of independent extraction runs reconciled per document
    pub consistency_runs: u32,

    /// Maximum time for a single extraction run (seconds)
    pub run_timeout_secs: u64,

    /// Maximum input text length (characters)
    pub max_text_length: usize,

    /// Confidence assigned to candidates whose run omitted the value
    pub default_confidence: f64,
}

impl ConsensusConfig {
    /// Get the per-run timeout as a Duration
    pub fn run_timeout(&self) -> Duration {
        Duration::from_secs(self.run_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.consistency_runs == 0 {
            return Err("consistency_runs must be greater than 0".to_string());
        }
        if self.run_timeout_secs == 0 {
            return Err("run_timeout_secs must be greater than 0".to_string());
        }
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.default_confidence) {
            return Err("default_confidence must be within [0.0, 1.0]".to_string());
        }
        Ok(())
    }
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            consistency_runs: 3,
            run_timeout_secs: 30,
            max_text_length: 50_000,
            default_confidence: 0.5,
        }
    }
}

impl ConsensusConfig {
    /// Fast preset: a single run, no redundancy. For interactive previews.
    pub fn fast() -> Self {
        Self {
            consistency_runs: 1,
            run_timeout_secs: 15,
            ..Self::default()
        }
    }

    /// Thorough preset: more runs and longer timeouts for noisy documents.
    pub fn thorough() -> Self {
        Self {
            consistency_runs: 5,
            run_timeout_secs: 60,
            ..Self::default()
        }
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
