//! gputemp - GPU temperature library
//!
//! Loads the NVIDIA NvAPI and AMD ADL driver modules at runtime and reports
//! the hottest sensor reading per vendor.
//!
//! # Modules
//!
//! - [`aggregator`]: Runs the vendor pipelines and builds the report
//! - [`arena`]: Bump allocator for driver callbacks and status text
//! - [`cli`]: Command-line interface definitions
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration system
//! - [`domain`]: Temperature and report types
//! - [`error`]: Error types
//! - [`status`]: Driver status code translation
//! - [`vendor`]: NvAPI and ADL bindings

pub mod aggregator;
pub mod arena;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod status;
pub mod vendor;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::{AppError, Result};
