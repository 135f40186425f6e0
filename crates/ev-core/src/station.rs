//! Charging-station classification enums shared by the registry, the trip
//! simulator, and the output writers.

use std::fmt;

/// Where a registry record came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SourceKind {
    /// Loaded from the charging-station input; never removed.
    PreBuilt,
    /// Appended by the driver at the position of a simulated stranding.
    Proposed,
}

/// Why a simulated trip stranded.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FailureKind {
    /// A charger was available but the detour to it exhausted the range.
    OutOfRange,
    /// Range ran out while the nearest station had no free charger.
    ChargersUnavailable,
}

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::PreBuilt => "pre_built",
            SourceKind::Proposed => "proposed",
        }
    }
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::OutOfRange => "out_of_range",
            FailureKind::ChargersUnavailable => "chargers_unavailable",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
