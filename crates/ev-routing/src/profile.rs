//! Distance profiles: distance-annotated paths the trip simulator walks.
//!
//! # Invariants
//!
//! For every profile built through this module:
//!
//! - `steps[0].segment_m == 0.0`;
//! - `steps[i].cumulative_m == steps[0..=i].segment_m.sum()`, so cumulative
//!   distance never decreases;
//! - the profile has at least one step.
//!
//! # Round trips
//!
//! A round trip is the forward path followed by the forward steps `0..n-1`
//! (every step but the destination) in reverse order.  The appended steps
//! keep the segment distance they had on the forward path, and cumulative
//! distance is recomputed over the whole sequence.  A forward profile of `n`
//! points therefore yields `2n - 1` points, and the round-trip total equals
//! the forward total plus the forward distances of all but the last point.

use ev_core::Point;

use crate::{RoutingError, RoutingResult};

/// One point of a [`DistanceProfile`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfileStep {
    /// Distance travelled to reach this point from the previous one.
    pub segment_m:    f64,
    /// Distance travelled from the start of the profile to this point.
    pub cumulative_m: f64,
    pub position:     Point,
}

/// An ordered, distance-annotated path.
///
/// Deserialised profiles go through the same checks as constructed ones, so
/// a stored profile is never empty.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "StoredProfile"))]
pub struct DistanceProfile {
    steps:      Vec<ProfileStep>,
    /// Index of the destination in a round trip; `None` for one-way paths.
    turnaround: Option<usize>,
}

impl DistanceProfile {
    /// Build a one-way profile from path positions and the per-segment
    /// distances between consecutive positions.
    ///
    /// `segment_distances` has one entry fewer than `positions`: the routing
    /// service does not annotate the origin, so a zero distance is prepended.
    pub fn from_path(positions: Vec<Point>, segment_distances: &[f64]) -> RoutingResult<Self> {
        if positions.is_empty() {
            return Err(RoutingError::Malformed("route has no positions".into()));
        }
        if positions.len() != segment_distances.len() + 1 {
            return Err(RoutingError::Malformed(format!(
                "{} positions but {} segment distances",
                positions.len(),
                segment_distances.len()
            )));
        }
        if let Some(bad) = segment_distances.iter().find(|d| !d.is_finite() || **d < 0.0) {
            return Err(RoutingError::Malformed(format!("invalid segment distance {bad}")));
        }

        let segments = std::iter::once(0.0).chain(segment_distances.iter().copied());
        Ok(Self { steps: accumulate(positions.into_iter().zip(segments)), turnaround: None })
    }

    /// The round trip out along this profile and back to its start.
    ///
    /// Applied to a profile that is already a round trip, the result is a
    /// round trip of the whole sequence.
    pub fn round_trip(&self) -> Self {
        let n = self.steps.len();
        let forward = self.steps.iter().map(|s| (s.position, s.segment_m));
        let back = self.steps[..n - 1].iter().rev().map(|s| (s.position, s.segment_m));
        Self { steps: accumulate(forward.chain(back)), turnaround: Some(n - 1) }
    }

    pub fn steps(&self) -> &[ProfileStep] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&ProfileStep> {
        self.steps.get(index)
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Constructors never produce an empty profile.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn start(&self) -> Point {
        self.steps[0].position
    }

    pub fn end(&self) -> Point {
        self.steps[self.steps.len() - 1].position
    }

    /// The final cumulative distance.
    pub fn total_distance_m(&self) -> f64 {
        self.steps[self.steps.len() - 1].cumulative_m
    }

    /// Index of the destination if this is a round trip.
    pub fn turnaround(&self) -> Option<usize> {
        self.turnaround
    }

    pub fn is_round_trip(&self) -> bool {
        self.turnaround.is_some()
    }
}

/// Unchecked wire form of a [`DistanceProfile`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct StoredProfile {
    steps:      Vec<ProfileStep>,
    turnaround: Option<usize>,
}

#[cfg(feature = "serde")]
impl TryFrom<StoredProfile> for DistanceProfile {
    type Error = RoutingError;

    fn try_from(stored: StoredProfile) -> RoutingResult<Self> {
        let StoredProfile { steps, turnaround } = stored;
        if steps.is_empty() {
            return Err(RoutingError::Malformed("stored profile has no steps".into()));
        }
        if let Some(t) = turnaround.filter(|&t| t >= steps.len()) {
            return Err(RoutingError::Malformed(format!(
                "turnaround {t} outside a profile of {} steps",
                steps.len()
            )));
        }
        Ok(Self { steps, turnaround })
    }
}

fn accumulate(rows: impl Iterator<Item = (Point, f64)>) -> Vec<ProfileStep> {
    let mut total = 0.0;
    rows.map(|(position, segment_m)| {
        total += segment_m;
        ProfileStep { segment_m, cumulative_m: total, position }
    })
    .collect()
}
