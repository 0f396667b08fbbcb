//! Metric kinds reported by each sensor.
//!
//! Every sensor exposes exactly one channel per kind. The short names are
//! part of the device node naming and must match the driver.

use crate::{Error, Result};
use std::str::FromStr;

/// Metric kind of a sensor channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    /// Battery voltage.
    Battery,
    /// Temperature in degrees Celsius.
    Temperature,
    /// Light level.
    Light,
}

impl MetricKind {
    /// All kinds, in polling order.
    pub const ALL: [MetricKind; 3] = [
        MetricKind::Battery,
        MetricKind::Temperature,
        MetricKind::Light,
    ];

    /// Returns the name used in device node paths.
    pub fn wire_name(&self) -> &'static str {
        match self {
            MetricKind::Battery => "batt",
            MetricKind::Temperature => "temp",
            MetricKind::Light => "light",
        }
    }

    /// Returns the column label used in tables.
    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::Battery => "Battery(V)",
            MetricKind::Temperature => "Temp(C)",
            MetricKind::Light => "Light",
        }
    }

    /// Returns the position of this kind in [`MetricKind::ALL`].
    pub fn index(&self) -> usize {
        match self {
            MetricKind::Battery => 0,
            MetricKind::Temperature => 1,
            MetricKind::Light => 2,
        }
    }
}

impl FromStr for MetricKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "batt" | "battery" => Ok(MetricKind::Battery),
            "temp" | "temperature" => Ok(MetricKind::Temperature),
            "light" => Ok(MetricKind::Light),
            _ => Err(Error::InvalidMetric(s.to_string())),
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}
