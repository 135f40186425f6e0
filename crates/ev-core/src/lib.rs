//! `ev-core` — foundational types for the `evreach` charger-siting simulator.
//!
//! This crate is a dependency of every other `ev-*` crate.  It intentionally
//! has no `ev-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `SegmentId`, `StationId`                              |
//! | [`geo`]         | `Point`, `Crs`, `Location`, distances                 |
//! | [`project`]     | UTM ↔ WGS-84 reprojection                             |
//! | [`rng`]         | `SimRng`, `CountSampler`, `PoissonSampler`            |
//! | [`station`]     | `SourceKind`, `FailureKind`                           |
//! | [`config`]      | `SimConfig`, `AvailabilityPolicy`                     |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by `ev-output` and the CLI config loader.         |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod project;
pub mod rng;
pub mod station;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{AvailabilityPolicy, SimConfig};
pub use error::{CoreError, CoreResult};
pub use geo::{Crs, Location, Point};
pub use ids::{SegmentId, StationId};
pub use rng::{CountSampler, PoissonSampler, SimRng};
pub use station::{FailureKind, SourceKind};
