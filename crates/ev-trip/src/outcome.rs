//! Trip phases and results.

use std::fmt;

use ev_core::{FailureKind, Point};

/// Where the vehicle is in its round trip.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TripPhase {
    /// Heading to the destination.
    Outbound,
    /// Heading back to the origin.
    Returning,
    /// Back at the origin.  Terminal.
    Completed,
    /// Out of range away from a usable charger.  Terminal.
    Stranded,
}

impl TripPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, TripPhase::Completed | TripPhase::Stranded)
    }
}

impl fmt::Display for TripPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TripPhase::Outbound => "outbound",
            TripPhase::Returning => "returning",
            TripPhase::Completed => "completed",
            TripPhase::Stranded => "stranded",
        })
    }
}

/// The classified result of one simulated trip.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TripOutcome {
    Success,
    Failure { kind: FailureKind, location: Point },
}

impl TripOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, TripOutcome::Failure { .. })
    }

    /// Outcome-log entry: `1` for a stranding, `0` otherwise.
    pub fn as_flag(&self) -> u8 {
        u8::from(self.is_failure())
    }
}

/// Everything the simulator observed about one trip.
#[derive(Clone, Debug, PartialEq)]
pub struct TripReport {
    pub outcome:       TripOutcome,
    /// `Completed` or `Stranded`.
    pub phase:         TripPhase,
    /// Charging detours started, including one that stranded.
    pub detours:       u32,
    /// Distance driven over all profiles and detours, in metres.
    pub driven_m:      f64,
    /// Range left when the trip ended; never negative on success.
    pub final_range_m: f64,
}
