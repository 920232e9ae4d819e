//! Command handlers
//!
//! Each command handler orchestrates the execution of a CLI command.

pub mod report;

pub use report::run_report;
