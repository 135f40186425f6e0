use thiserror::Error;

use ev_routing::RoutingError;
use ev_spatial::SpatialError;

/// A trip that could not be simulated to a classified outcome.
#[derive(Debug, Error)]
pub enum TripError {
    #[error("routing failed mid-trip: {0}")]
    Routing(#[from] RoutingError),

    #[error("charger lookup failed: {0}")]
    Spatial(#[from] SpatialError),

    #[error("trip needed more than {limit} charging detours")]
    TooManyDetours { limit: u32 },

    #[error("route profile has no steps")]
    EmptyProfile,
}

pub type TripResult<T> = Result<T, TripError>;
