//! Domain models for gputemp
//!
//! Vendor identities, temperatures and the per-vendor report.

pub mod report;
pub mod thermal;

pub use report::{TemperatureReport, Vendor};
pub use thermal::{Temperature, ThermalMax};
