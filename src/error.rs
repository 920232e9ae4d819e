//! Unified error types for gputemp
//!
//! This module defines all error types used throughout the application.
//! Uses thiserror for ergonomic error definitions.

use crate::domain::Vendor;
use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a vendor pipeline
    #[error("Vendor error: {0}")]
    Vendor(#[from] VendorError),

    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error (file operations, output)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that abort one vendor pipeline
///
/// Per-adapter query failures are not represented here: they are logged and
/// the adapter is skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VendorError {
    /// The vendor module could not be loaded
    #[error("Failed to load {library}: {reason}")]
    ModuleLoad { library: String, reason: String },

    /// A required function could not be resolved from the vendor module
    #[error("{library} is missing required entry point {symbol}")]
    MissingEntryPoint { library: String, symbol: String },

    /// The vendor interface refused to initialise
    #[error("Failed to initialise {vendor} interface with error {status}")]
    Initialization { vendor: Vendor, status: String },

    /// The vendor context could not be created
    #[error("Failed to create {vendor} context with error {status}")]
    ContextCreation { vendor: Vendor, status: String },

    /// Adapter enumeration failed
    #[error("Failed to enumerate {vendor} GPUs with error {status}")]
    Enumeration { vendor: Vendor, status: String },

    /// Every adapter query failed, or there were no adapters
    #[error("No {vendor} GPU reported a temperature")]
    NoReadings { vendor: Vendor },
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Invalid config value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
