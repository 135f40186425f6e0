//! `ev-trip` — simulate one electric-vehicle round trip.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                  |
//! |------------------|-----------------------------------------------------------|
//! | [`outcome`]      | `TripPhase`, `TripOutcome`, `TripReport`                  |
//! | [`availability`] | `check_availability` — Poisson occupancy draws            |
//! | [`simulator`]    | `TripSimulator` — the walk/detour/re-route state machine  |
//! | [`error`]        | `TripError`, `TripResult<T>`                              |
//!
//! # Outcomes versus errors
//!
//! A stranding is a valid result: `Ok(TripReport)` whose outcome is
//! [`TripOutcome::Failure`].  `Err(TripError)` means the trip could not be
//! simulated at all (routing gave up mid-trip, the detour cap was hit) and
//! the driver must halt the run.

pub mod availability;
pub mod error;
pub mod outcome;
pub mod simulator;

#[cfg(test)]
mod tests;

pub use availability::{Availability, check_availability};
pub use error::{TripError, TripResult};
pub use outcome::{TripOutcome, TripPhase, TripReport};
pub use simulator::TripSimulator;
