//! The routing client: reprojection, bounded retry, and profile building.

use std::thread;
use std::time::Duration;

use ev_core::{Crs, Location, Point, SimConfig};

use crate::{DistanceProfile, FetchError, RawRoute, RouteService, RoutingError, RoutingResult};

// ── RetryPolicy ───────────────────────────────────────────────────────────────

/// How often and how patiently a request is repeated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first; treated as at least 1.
    pub max_attempts: u32,
    /// Fixed pause between consecutive attempts.
    pub pause:        Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, pause: Duration) -> Self {
        Self { max_attempts, pause }
    }

    /// Retry immediately; used by tests and local servers.
    pub fn no_pause(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO)
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.routing_attempts, Duration::from_millis(config.routing_retry_pause_ms))
    }
}

impl Default for RetryPolicy {
    /// Four attempts, one second apart.
    fn default() -> Self {
        Self::new(4, Duration::from_secs(1))
    }
}

// ── RoutingClient ─────────────────────────────────────────────────────────────

/// Builds [`DistanceProfile`]s from a [`RouteService`].
///
/// The client holds no per-request state: every call issues a fresh request,
/// so a deterministic service always yields identical profiles for identical
/// arguments.
///
/// # Example
///
/// ```ignore
/// let client = RoutingClient::new(OsrmService::new(endpoint, timeout)?, Crs::Wgs84, RetryPolicy::default());
/// let profile = client.compute_route(&origin, &destination, true)?;
/// ```
pub struct RoutingClient<S> {
    service: S,
    crs:     Crs,
    retry:   RetryPolicy,
}

impl<S: RouteService> RoutingClient<S> {
    /// `crs` is the coordinate system the service expects and returns.
    pub fn new(service: S, crs: Crs, retry: RetryPolicy) -> Self {
        Self { service, crs, retry }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn crs(&self) -> Crs {
        self.crs
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Route between two sampled locations.
    pub fn compute_route(
        &self,
        origin:      &Location,
        destination: &Location,
        round_trip:  bool,
    ) -> RoutingResult<DistanceProfile> {
        self.route_between(origin.point, destination.point, round_trip)
    }

    /// Route between two points in any coordinate system.  Profile positions
    /// are in the client's system.
    pub fn route_between(&self, from: Point, to: Point, round_trip: bool) -> RoutingResult<DistanceProfile> {
        let from = from.reproject(self.crs)?;
        let to = to.reproject(self.crs)?;
        let raw = self.fetch_with_retry(from, to)?;

        let positions = raw.coordinates.iter().map(|&[x, y]| Point::new(x, y, self.crs)).collect();
        let forward = DistanceProfile::from_path(positions, &raw.annotations)?;
        tracing::trace!(
            points = forward.len(),
            reported_m = raw.distance_m,
            summed_m = forward.total_distance_m(),
            "route fetched"
        );

        Ok(if round_trip { forward.round_trip() } else { forward })
    }

    fn fetch_with_retry(&self, from: Point, to: Point) -> RoutingResult<RawRoute> {
        let attempts = self.retry.max_attempts.max(1);
        let mut last = String::new();

        for attempt in 1..=attempts {
            match self.service.fetch(from, to) {
                Ok(raw) => return Ok(raw),
                Err(FetchError::NoRoute(msg)) => return Err(RoutingError::NoRoute(msg)),
                Err(e) if !e.is_retryable() => return Err(RoutingError::Malformed(e.to_string())),
                Err(e) => {
                    if attempt < attempts {
                        tracing::warn!(attempt, max_attempts = attempts, error = %e, "routing request failed; retrying");
                        if !self.retry.pause.is_zero() {
                            thread::sleep(self.retry.pause);
                        }
                    }
                    last = e.to_string();
                }
            }
        }

        Err(RoutingError::Unavailable { attempts, last })
    }
}
