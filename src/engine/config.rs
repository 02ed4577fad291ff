//! Configuration Management
//!
//! Configuration loading and validation for sort sessions. Every section has a
//! `Default`, and missing fields in a JSON document fall back to it.

use crate::engine::pacing::MAX_DIAL;
use crate::engine::{DataOrdering, EngineError, Result, SortingAlgorithm};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default worker stack size, enough for one recursion level per element of
/// arrays far larger than a renderer can show
pub const DEFAULT_STACK_SIZE: usize = 256 * 1024 * 1024;

/// Smallest accepted worker stack size
pub const MIN_STACK_SIZE: usize = 64 * 1024;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Initial pacing dial positions
    pub pacing: PacingConfig,
    /// Generated data parameters
    pub data: DataConfig,
    /// Algorithm started by default
    pub algorithm: SortingAlgorithm,
    /// Worker thread settings
    pub worker: WorkerConfig,
}

/// Pacing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Delay dial, 0 (fastest) to 100 (slowest)
    pub delay: u32,
    /// Compare/swap time distribution, 0 to 100
    pub distribution: u32,
}

/// Data generation configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Number of values
    pub count: usize,
    /// Exclusive upper bound of the values
    pub upper_bound: i32,
    pub ordering: DataOrdering,
    /// Seed for reproducible data, random if absent
    pub seed: Option<u64>,
}

/// Worker thread configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Name of the sort worker thread
    pub thread_name: String,
    /// CPU core to pin the worker to
    pub pin_core: Option<usize>,
    /// Stack size of the worker thread in bytes
    pub stack_size: usize,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            delay: 50,
            distribution: 50,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            count: 100,
            upper_bound: 1000,
            ordering: DataOrdering::Random,
            seed: None,
        }
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            thread_name: "sort-worker".to_string(),
            pin_core: None,
            stack_size: DEFAULT_STACK_SIZE,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a configuration from a JSON document
    ///
    /// # Errors
    /// Returns `EngineError::InvalidInput` if the document cannot be parsed or
    /// holds invalid values
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)
            .map_err(|e| EngineError::InvalidInput(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    ///
    /// # Arguments
    /// * `path` - Path of a JSON configuration file
    ///
    /// # Errors
    /// Returns `EngineError::InvalidInput` if the file cannot be read or parsed,
    /// or holds invalid values
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            EngineError::InvalidInput(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&content)
    }

    /// Serialize the configuration as pretty-printed JSON
    ///
    /// # Errors
    /// Returns `EngineError::InvalidInput` if serialization fails
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| EngineError::InvalidInput(format!("Failed to serialize config: {e}")))
    }

    /// Validate every section
    ///
    /// # Errors
    /// Returns `EngineError::InvalidInput` naming the first invalid value
    pub fn validate(&self) -> Result<()> {
        validate_pacing_config(&self.pacing)?;
        validate_data_config(&self.data)?;
        validate_worker_config(&self.worker)?;
        Ok(())
    }
}

fn validate_pacing_config(config: &PacingConfig) -> Result<()> {
    if config.delay > MAX_DIAL {
        return Err(EngineError::InvalidInput(format!(
            "Delay must be at most {MAX_DIAL}, got {}",
            config.delay
        )));
    }
    if config.distribution > MAX_DIAL {
        return Err(EngineError::InvalidInput(format!(
            "Distribution must be at most {MAX_DIAL}, got {}",
            config.distribution
        )));
    }
    Ok(())
}

fn validate_data_config(config: &DataConfig) -> Result<()> {
    if config.count == 0 {
        return Err(EngineError::InvalidInput("Data count cannot be zero".into()));
    }
    if config.upper_bound <= 0 {
        return Err(EngineError::InvalidInput(format!(
            "Upper bound must be positive, got {}",
            config.upper_bound
        )));
    }
    Ok(())
}

fn validate_worker_config(config: &WorkerConfig) -> Result<()> {
    if config.thread_name.trim().is_empty() {
        return Err(EngineError::InvalidInput(
            "Worker thread name cannot be empty".into(),
        ));
    }
    if config.stack_size < MIN_STACK_SIZE {
        return Err(EngineError::InvalidInput(format!(
            "Worker stack size must be at least {MIN_STACK_SIZE} bytes, got {}",
            config.stack_size
        )));
    }
    Ok(())
}
