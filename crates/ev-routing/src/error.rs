//! Routing error type.

use thiserror::Error;

use ev_core::CoreError;

/// Errors produced by `ev-routing`.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// The service never answered successfully within the retry budget.
    /// Callers treat this as "no route available right now".
    #[error("routing service unavailable after {attempts} attempts: {last}")]
    Unavailable { attempts: u32, last: String },

    /// The service answered but found no route between the points.
    #[error("no route: {0}")]
    NoRoute(String),

    /// The service answered with something that is not a usable route.
    #[error("malformed route: {0}")]
    Malformed(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[cfg(feature = "osrm")]
    #[error("HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

impl RoutingError {
    /// `true` for the bounded-retry failure the driver discards silently.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, RoutingError::Unavailable { .. })
    }
}

pub type RoutingResult<T> = Result<T, RoutingError>;
