//! Configuration file loading
//!
//! Handles loading configuration from TOML files.

use crate::config::Config;
use crate::error::ConfigError;

use std::path::{Path, PathBuf};

/// Configuration file handler
pub struct ConfigFile;

impl ConfigFile {
    /// Load and validate configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;

        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load_default() -> Option<Config> {
        Self::load_first(&Self::default_paths())
    }

    /// Load the first usable file among `paths`
    ///
    /// Unreadable or invalid files are logged and skipped.
    pub fn load_first(paths: &[PathBuf]) -> Option<Config> {
        for path in paths {
            if path.exists() {
                match Self::load(path) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", path.display());
                        return Some(config);
                    }
                    Err(e) => log::warn!("Ignoring {}: {}", path.display(), e),
                }
            }
        }
        None
    }

    /// Get default configuration file paths, in search order
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("gputemp").join("config.toml"));
        }

        // Current directory
        paths.push(PathBuf::from("gputemp.toml"));
        paths.push(PathBuf::from(".gputemp.toml"));

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_paths_not_empty() {
        let paths = ConfigFile::default_paths();
        assert!(!paths.is_empty());
        assert!(paths.iter().any(|p| p.ends_with("gputemp.toml")));
    }

    #[test]
    fn test_load_missing_file() {
        let result = ConfigFile::load("/nonexistent/path/config.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[general]\nparallel = true\n\n[nvidia]\nenabled = false\n\n[scratch]\ncapacity_bytes = 4096"
        )
        .unwrap();

        let config = ConfigFile::load(file.path()).unwrap();
        assert!(config.general.parallel);
        assert!(!config.nvidia.enabled);
        assert_eq!(config.scratch.capacity_bytes, 4096);
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[amd\nenabled = ").unwrap();

        let result = ConfigFile::load(file.path());
        assert!(matches!(result, Err(ConfigError::TomlError(_))));
    }

    #[test]
    fn test_load_first_skips_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("gputemp.toml");
        let good = dir.path().join(".gputemp.toml");
        std::fs::write(&broken, "[amd\nenabled = ").unwrap();
        std::fs::write(&good, "[general]\nparallel = true").unwrap();

        let config = ConfigFile::load_first(&[broken.clone(), good]).unwrap();
        assert!(config.general.parallel);

        assert!(ConfigFile::load_first(&[broken]).is_none());
    }

    #[test]
    fn test_load_first_without_files() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ConfigFile::load_first(&[dir.path().join("missing.toml")]).is_none());
    }

    #[test]
    fn test_load_invalid_value() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scratch]\ncapacity_bytes = 0").unwrap();

        let result = ConfigFile::load(file.path());
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}
