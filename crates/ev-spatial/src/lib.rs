//! `ev-spatial` — road network, point sampling, and the charger registry.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`network`]  | `RoadNetwork`, `RoadSegment`, `RoadNetworkBuilder`           |
//! | [`sampler`]  | `PointProvider` trait, `NetworkSampler`                      |
//! | [`registry`] | `ChargerRegistry` (append-only, R-tree nearest neighbour)    |
//! | [`loader`]   | CSV loaders for road segments and charging stations          |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod loader;
pub mod network;
pub mod registry;
pub mod sampler;


pub use error::{SpatialError, SpatialResult};
pub use loader::{load_network_csv, load_network_reader, load_stations_csv, load_stations_reader};
pub use network::{RoadNetwork, RoadNetworkBuilder, RoadSegment};
pub use registry::{ChargerRecord, ChargerRegistry};
pub use sampler::{NetworkSampler, PointProvider};
