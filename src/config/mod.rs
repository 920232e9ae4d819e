//! Configuration system
//!
//! Handles TOML config file parsing and CLI argument merging.

pub mod builder;
pub mod file;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;

use crate::arena::DEFAULT_CAPACITY;
use crate::error::ConfigError;
use crate::vendor::{adl, nvapi};
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// Scratch arena settings
    pub scratch: ScratchConfig,
    /// NVIDIA backend settings
    pub nvidia: NvidiaConfig,
    /// AMD backend settings
    pub amd: AmdConfig,
}

impl Config {
    /// Check values that deserialize fine but cannot work
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scratch.capacity_bytes == 0 {
            return Err(invalid("scratch.capacity_bytes", "must be greater than zero"));
        }
        if self.nvidia.library.trim().is_empty() {
            return Err(invalid("nvidia.library", "must not be empty"));
        }
        if self.amd.library.trim().is_empty() {
            return Err(invalid("amd.library", "must not be empty"));
        }
        Ok(())
    }
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,
    /// Run the vendor pipelines on separate threads
    pub parallel: bool,
}

/// Scratch arena configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScratchConfig {
    /// Size of the bump arena in bytes
    pub capacity_bytes: usize,
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self {
            capacity_bytes: DEFAULT_CAPACITY,
        }
    }
}

/// NVIDIA backend configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NvidiaConfig {
    /// Query NVIDIA GPUs
    pub enabled: bool,
    /// NvAPI module name or path
    pub library: String,
}

impl Default for NvidiaConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            library: nvapi::ffi::DEFAULT_LIBRARY.to_string(),
        }
    }
}

/// AMD backend configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AmdConfig {
    /// Query AMD GPUs
    pub enabled: bool,
    /// ADL module name or path
    pub library: String,
    /// Enumerate only connected adapters
    pub connected_only: bool,
}

impl Default for AmdConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            library: adl::ffi::DEFAULT_LIBRARY.to_string(),
            connected_only: true,
        }
    }
}
