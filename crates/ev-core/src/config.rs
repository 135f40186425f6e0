//! Run configuration.
//!
//! Every tunable of a simulation run lives in [`SimConfig`].  Nothing reads
//! process-wide defaults: the application builds (or deserialises) one value
//! and passes it down explicitly.

use crate::{CoreError, CoreResult, Crs};

/// How the trip simulator decides whether the nearest station has a free
/// charger.
///
/// Each draw samples "chargers in use" from a Poisson distribution; a draw
/// strictly below the station's charger count means a charger is free.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum AvailabilityPolicy {
    /// One draw decides.
    DecideOnce,
    /// Redraw while unavailable, up to `max_draws` draws in total; the
    /// charger is judged unavailable when every draw failed.
    Bounded { max_draws: u32 },
    /// Redraw until a draw clears the threshold.  May not terminate for a
    /// station whose occupancy can never fall below its capacity.
    Unbounded,
}

impl AvailabilityPolicy {
    /// Maximum number of draws, or `None` for no cap.
    pub fn max_draws(self) -> Option<u32> {
        match self {
            AvailabilityPolicy::DecideOnce => Some(1),
            AvailabilityPolicy::Bounded { max_draws } => Some(max_draws.max(1)),
            AvailabilityPolicy::Unbounded => None,
        }
    }
}

impl Default for AvailabilityPolicy {
    fn default() -> Self {
        AvailabilityPolicy::Bounded { max_draws: 8 }
    }
}

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the driver.  Distances are metres.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Distance a fully charged vehicle can drive.  Default: 250 miles.
    pub full_range_m: f64,

    /// Fraction of `full_range_m` below which the driver looks for a charger.
    pub low_fuel_fraction: f64,

    /// Round trips must be strictly longer than this to be simulated; end
    /// points are sampled at least half of it away from the start.
    pub target_trip_distance_m: f64,

    /// Number of accepted trip attempts to simulate.
    pub sample_count: u64,

    /// Mean of the Poisson "chargers in use" draw.
    pub poisson_mean: f64,

    pub availability: AvailabilityPolicy,

    /// Charger count given to stations proposed at stranding sites.
    pub proposed_charger_count: u32,

    /// Charging detours allowed within one trip before the trip is aborted
    /// as an unexpected error.
    pub max_detours_per_trip: u32,

    /// Candidate round trips rejected in a row (routing failure or too
    /// short) before the run halts.
    pub max_consecutive_rejections: u64,

    /// Master RNG seed.  The same seed and routing responses reproduce a run.
    pub seed: u64,

    /// Base URL of the OSRM-compatible routing service.
    pub routing_endpoint: String,

    /// Total routing attempts per request (first try plus retries).
    pub routing_attempts: u32,

    /// Pause between routing attempts, milliseconds.
    pub routing_retry_pause_ms: u64,

    /// Per-request transport timeout, seconds.
    pub routing_timeout_secs: u64,

    /// System the routing service expects coordinates in.
    pub routing_crs: Crs,

    /// System the road-network input is expressed in.
    pub network_crs: Crs,

    /// Road classification level that trip starts are drawn from
    /// (minor/residential roads).
    pub start_segment_level: u8,
}

impl SimConfig {
    /// Remaining range below which a charging detour is attempted.
    #[inline]
    pub fn low_fuel_threshold_m(&self) -> f64 {
        self.full_range_m * self.low_fuel_fraction
    }

    /// Minimum straight-line separation between start and end points.
    #[inline]
    pub fn min_separation_m(&self) -> f64 {
        self.target_trip_distance_m / 2.0
    }

    /// Reject configurations that would make the simulation meaningless or
    /// non-terminating.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.full_range_m.is_finite() || self.full_range_m <= 0.0 {
            return Err(CoreError::Config(format!(
                "full_range_m must be positive, got {}",
                self.full_range_m
            )));
        }
        if !(0.0..1.0).contains(&self.low_fuel_fraction) {
            return Err(CoreError::Config(format!(
                "low_fuel_fraction must be in [0, 1), got {}",
                self.low_fuel_fraction
            )));
        }
        if self.target_trip_distance_m.is_nan() || self.target_trip_distance_m < 0.0 {
            return Err(CoreError::Config("target_trip_distance_m must be non-negative".into()));
        }
        if self.poisson_mean.is_nan() || self.poisson_mean < 0.0 {
            return Err(CoreError::Config("poisson_mean must be non-negative".into()));
        }
        if self.proposed_charger_count == 0 {
            return Err(CoreError::Config("proposed_charger_count must be at least 1".into()));
        }
        if self.routing_attempts == 0 {
            return Err(CoreError::Config("routing_attempts must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            full_range_m:               402_336.0,
            low_fuel_fraction:          0.25,
            target_trip_distance_m:     402_336.0,
            sample_count:               1,
            poisson_mean:               2.0,
            availability:               AvailabilityPolicy::default(),
            proposed_charger_count:     4,
            max_detours_per_trip:       64,
            max_consecutive_rejections: 10_000,
            seed:                       42,
            routing_endpoint:           "http://router.project-osrm.org".to_string(),
            routing_attempts:           4,
            routing_retry_pause_ms:     1_000,
            routing_timeout_secs:       30,
            routing_crs:                Crs::Wgs84,
            network_crs:                Crs::Utm { zone: 13, north: true },
            start_segment_level:        3,
        }
    }
}
