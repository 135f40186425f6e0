//! Run observer trait for progress reporting and persistence.

use ev_routing::DistanceProfile;
use ev_spatial::ChargerRecord;
use ev_trip::TripReport;

use crate::{Checkpoint, SimulationRunState};

/// Why a candidate trip was not simulated.
#[derive(Clone, Debug, PartialEq)]
pub enum Rejection {
    /// No usable end point (or start vertex) could be sampled.
    NoEndpoint { reason: String },
    /// The round trip could not be routed.
    Unroutable { reason: String },
    /// The round trip was not longer than the target distance.
    TooShort { total_m: f64 },
}

/// Callbacks invoked by [`SimulationDriver::run`][crate::SimulationDriver::run].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — failure counter
///
/// ```rust,ignore
/// struct Strandings(usize);
///
/// impl RunObserver for Strandings {
///     fn on_station_proposed(&mut self, _record: &ChargerRecord) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait RunObserver {
    /// A candidate round trip was accepted as attempt number `attempt`
    /// (1-based).
    fn on_attempt_accepted(&mut self, _attempt: u64, _route: &DistanceProfile) {}

    /// A candidate round trip was discarded without counting.
    fn on_attempt_rejected(&mut self, _rejection: &Rejection) {}

    /// Attempt `attempt` was simulated to a classified outcome.
    fn on_outcome(&mut self, _attempt: u64, _report: &TripReport) {}

    /// A stranding added a proposed station to the registry.
    fn on_station_proposed(&mut self, _record: &ChargerRecord) {}

    /// A trip failed unexpectedly; the run halts after this call.
    fn on_halt(&mut self, _checkpoint: &Checkpoint) {}

    /// Called once with the final state, whether the run completed or halted.
    fn on_run_end(&mut self, _state: &SimulationRunState) {}
}

/// A [`RunObserver`] that does nothing.
pub struct NoopObserver;

impl RunObserver for NoopObserver {}
