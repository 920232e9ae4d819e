//! Thermal domain types
//!
//! Provides the temperature type and the running-maximum reducer used by
//! every vendor pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Temperature(i32);

impl Temperature {
    pub const ZERO: Temperature = Temperature(0);

    /// Create a new Temperature
    pub const fn new(celsius: i32) -> Self {
        Self(celsius)
    }

    /// Convert a millidegree reading, truncating toward zero
    pub const fn from_millidegrees(millidegrees: i32) -> Self {
        Self(millidegrees / 1000)
    }

    /// Get the temperature in Celsius
    #[inline]
    pub const fn as_celsius(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} C", self.0)
    }
}

impl From<i32> for Temperature {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

impl From<Temperature> for i32 {
    fn from(temp: Temperature) -> Self {
        temp.0
    }
}

/// Running maximum over sensor readings
///
/// Seeded at 0 by the first reading, so readings below freezing report as
/// 0. The held value only ever rises.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThermalMax {
    hottest: Option<Temperature>,
    samples: usize,
}

impl ThermalMax {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one reading into the maximum
    pub fn observe(&mut self, reading: Temperature) {
        self.samples += 1;
        let current = self.hottest.unwrap_or(Temperature::ZERO);
        self.hottest = Some(current.max(reading));
    }

    /// Number of readings observed
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Hottest reading, or `None` if nothing was observed
    pub fn hottest(&self) -> Option<Temperature> {
        self.hottest
    }
}

impl Extend<Temperature> for ThermalMax {
    fn extend<I: IntoIterator<Item = Temperature>>(&mut self, iter: I) {
        for reading in iter {
            self.observe(reading);
        }
    }
}
