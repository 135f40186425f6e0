//! The routing-service seam.
//!
//! [`RouteService`] is one request against an external path planner, with no
//! retry and no interpretation beyond decoding.  [`RoutingClient`] layers the
//! retry policy and profile construction on top.
//!
//! [`RoutingClient`]: crate::RoutingClient

use thiserror::Error;

use ev_core::Point;

/// A decoded, uninterpreted route.
#[derive(Clone, Debug, PartialEq)]
pub struct RawRoute {
    /// Path vertices as `[x, y]` in the service's coordinate system.
    pub coordinates: Vec<[f64; 2]>,
    /// Distance in metres between consecutive `coordinates`; one entry fewer
    /// than `coordinates`.
    pub annotations: Vec<f64>,
    /// Total route distance reported by the service, in metres.
    pub distance_m:  f64,
}

/// Why a single request failed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FetchError {
    #[error("routing service returned status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("no route: {0}")]
    NoRoute(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    /// Whether repeating the identical request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Status(_) | FetchError::Transport(_))
    }
}

/// One request to an external routing service.
///
/// Both points are already in the service's coordinate system.
pub trait RouteService {
    fn fetch(&self, from: Point, to: Point) -> Result<RawRoute, FetchError>;
}

impl<S: RouteService + ?Sized> RouteService for &S {
    fn fetch(&self, from: Point, to: Point) -> Result<RawRoute, FetchError> {
        (**self).fetch(from, to)
    }
}

impl<S: RouteService + ?Sized> RouteService for Box<S> {
    fn fetch(&self, from: Point, to: Point) -> Result<RawRoute, FetchError> {
        (**self).fetch(from, to)
    }
}
