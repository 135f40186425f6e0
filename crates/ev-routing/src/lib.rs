//! `ev-routing` — distance profiles and the routing client.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`profile`]  | `DistanceProfile`, `ProfileStep`, round-trip construction    |
//! | [`service`]  | `RouteService` trait, `RawRoute`, `FetchError`               |
//! | [`response`] | OSRM JSON response types and decoding into `RawRoute`        |
//! | [`osrm`]     | `OsrmService` blocking HTTP backend (feature = `"osrm"`)     |
//! | [`client`]   | `RoutingClient` — reprojection, retry policy, profiles       |
//! | [`error`]    | `RoutingError`, `RoutingResult<T>`                           |
//!
//! # Pluggability
//!
//! The simulator only talks to [`RoutingClient`], which only talks to a
//! [`RouteService`].  Tests plug in scripted services; production plugs in
//! [`OsrmService`](osrm::OsrmService).  The client keeps no state between
//! calls, so the same request against a deterministic service always yields
//! the same profile.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `osrm`  | (default) Enables the `reqwest`-based OSRM backend.          |
//! | `serde` | Derives `Serialize`/`Deserialize` on profile types.          |

pub mod client;
pub mod error;
pub mod profile;
pub mod response;
pub mod service;

#[cfg(feature = "osrm")]
pub mod osrm;


pub use client::{RetryPolicy, RoutingClient};
pub use error::{RoutingError, RoutingResult};
pub use profile::{DistanceProfile, ProfileStep};
pub use service::{FetchError, RawRoute, RouteService};

#[cfg(feature = "osrm")]
pub use osrm::OsrmService;
