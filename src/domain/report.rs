//! Per-vendor temperature report

use crate::domain::Temperature;
use serde::{Deserialize, Serialize};
use std::fmt;

/// GPU vendor with a supported management interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    Nvidia,
    Amd,
}

impl Vendor {
    /// All vendors, in report order
    pub const ALL: [Vendor; 2] = [Vendor::Nvidia, Vendor::Amd];

    /// Display name as used in the textual report
    pub const fn name(&self) -> &'static str {
        match self {
            Vendor::Nvidia => "NVIDIA",
            Vendor::Amd => "AMD",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hottest temperature per vendor
///
/// `None` means the vendor was unavailable or produced no reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemperatureReport {
    pub nvidia: Option<Temperature>,
    pub amd: Option<Temperature>,
}

impl TemperatureReport {
    pub fn new(nvidia: Option<Temperature>, amd: Option<Temperature>) -> Self {
        Self { nvidia, amd }
    }

    /// Reading for a vendor
    pub fn get(&self, vendor: Vendor) -> Option<Temperature> {
        match vendor {
            Vendor::Nvidia => self.nvidia,
            Vendor::Amd => self.amd,
        }
    }

    /// Store the reading for a vendor, replacing any previous value
    pub fn record(&mut self, vendor: Vendor, reading: Option<Temperature>) {
        match vendor {
            Vendor::Nvidia => self.nvidia = reading,
            Vendor::Amd => self.amd = reading,
        }
    }

    /// Reading in Celsius with `0` standing for "no data"
    pub fn celsius_or_zero(&self, vendor: Vendor) -> i32 {
        self.get(vendor).map(|t| t.as_celsius()).unwrap_or(0)
    }

    /// Both readings as plain integers, `(nvidia, amd)`
    pub fn as_pair(&self) -> (i32, i32) {
        (
            self.celsius_or_zero(Vendor::Nvidia),
            self.celsius_or_zero(Vendor::Amd),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_display() {
        assert_eq!(Vendor::Nvidia.to_string(), "NVIDIA");
        assert_eq!(Vendor::Amd.to_string(), "AMD");
    }

    #[test]
    fn test_empty_report_is_zero_pair() {
        let report = TemperatureReport::default();
        assert_eq!(report.as_pair(), (0, 0));
    }

    #[test]
    fn test_record_and_get() {
        let mut report = TemperatureReport::default();
        report.record(Vendor::Amd, Some(Temperature::new(61)));

        assert_eq!(report.get(Vendor::Amd), Some(Temperature::new(61)));
        assert_eq!(report.get(Vendor::Nvidia), None);
        assert_eq!(report.as_pair(), (0, 61));
    }

    #[test]
    fn test_report_json_uses_null_for_absent() {
        let report = TemperatureReport::new(Some(Temperature::new(72)), None);
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, r#"{"nvidia":72,"amd":null}"#);
    }
}
