//! Configuration builder
//!
//! Merges configuration from files and CLI arguments.

use crate::config::{Config, ConfigFile};
use crate::error::ConfigError;

/// Builder for merging configuration sources
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Load configuration from a file, or from the default locations
    ///
    /// An explicitly named file must exist and parse; default files that are
    /// missing or broken are skipped.
    pub fn with_file(mut self, path: Option<&str>) -> Result<Self, ConfigError> {
        let file_config = match path {
            Some(path) => Some(ConfigFile::load(path)?),
            None => ConfigFile::load_default(),
        };

        if let Some(cfg) = file_config {
            self.config = cfg;
        }

        Ok(self)
    }

    /// Override with CLI verbose flag
    pub fn with_verbose(mut self, verbose: Option<bool>) -> Self {
        if let Some(v) = verbose {
            self.config.general.verbose = v;
        }
        self
    }

    /// Override with CLI parallel flag
    pub fn with_parallel(mut self, parallel: Option<bool>) -> Self {
        if let Some(p) = parallel {
            self.config.general.parallel = p;
        }
        self
    }

    /// Disable the NVIDIA backend
    pub fn without_nvidia(mut self, disable: bool) -> Self {
        if disable {
            self.config.nvidia.enabled = false;
        }
        self
    }

    /// Disable the AMD backend
    pub fn without_amd(mut self, disable: bool) -> Self {
        if disable {
            self.config.amd.enabled = false;
        }
        self
    }

    /// Override the NvAPI module name
    pub fn with_nvidia_library(mut self, library: Option<String>) -> Self {
        if let Some(l) = library {
            self.config.nvidia.library = l;
        }
        self
    }

    /// Override the ADL module name
    pub fn with_amd_library(mut self, library: Option<String>) -> Self {
        if let Some(l) = library {
            self.config.amd.library = l;
        }
        self
    }

    /// Override the scratch arena size
    pub fn with_scratch_capacity(mut self, bytes: Option<usize>) -> Self {
        if let Some(b) = bytes {
            self.config.scratch.capacity_bytes = b;
        }
        self
    }

    /// Build and validate the final configuration
    pub fn build(self) -> Result<Config, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
