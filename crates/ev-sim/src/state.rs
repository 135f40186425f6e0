//! Run results and crash checkpoints.

use ev_core::Location;
use ev_routing::DistanceProfile;
use ev_spatial::ChargerRecord;

/// How a run ended.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum RunStatus {
    /// Every requested attempt was simulated.
    Completed,
    /// The run stopped early.
    Halted { reason: String },
}

impl RunStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunStatus::Completed)
    }
}

/// The state that outlives a run: the registry and the outcome log.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationRunState {
    /// Every station, pre-built first, then proposals in discovery order.
    pub registry: Vec<ChargerRecord>,
    /// One entry per simulated trip: `1` stranded, `0` completed.
    pub outcomes: Vec<u8>,
    pub status:   RunStatus,
}

impl SimulationRunState {
    pub fn attempts(&self) -> usize {
        self.outcomes.len()
    }

    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|&&o| o == 1).count()
    }

    /// Fraction of simulated trips that stranded; `0.0` for an empty log.
    pub fn failure_rate(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        self.failures() as f64 / self.outcomes.len() as f64
    }
}

/// Written when a trip cannot be simulated: the registry at the time and
/// the trip that broke.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Checkpoint {
    pub registry:    Vec<ChargerRecord>,
    pub origin:      Location,
    pub destination: Location,
    pub route:       DistanceProfile,
    pub error:       String,
}
