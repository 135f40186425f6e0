//! `ev-sim` — the Monte-Carlo loop around the trip simulator.
//!
//! # Run loop
//!
//! ```text
//! until sample_count attempts are accepted:
//!   ① Sample    — origin on a start-level segment, destination at least
//!                 target/2 away (PointProvider).  No such destination
//!                 discards the candidate.
//!   ② Route     — round trip origin → destination → origin.  A routing
//!                 failure discards the candidate.
//!   ③ Accept    — only round trips longer than the target distance count.
//!   ④ Simulate  — TripSimulator against the current registry.
//!   ⑤ Record    — append 0/1 to the outcome log; a stranding appends a
//!                 proposed station to the registry.
//!   ✗ TripError — checkpoint (registry + in-flight route) and halt.
//!   ✗ other     — halt without a checkpoint.
//!
//! Every halt still ends in RunObserver::on_run_end with the final state.
//! ```
//!
//! Trips run one after another: each sees every station proposed by the
//! trips before it.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let client = RoutingClient::new(OsrmService::new(&cfg.routing_endpoint, timeout)?, cfg.routing_crs, RetryPolicy::from_config(&cfg));
//! let provider = NetworkSampler::new(&network, cfg.start_segment_level, cfg.routing_crs, rng.child(1));
//! let mut driver = SimulationDriver::new(cfg, client, provider, registry, PoissonSampler::new(rng.child(2)))?;
//! let state = driver.run(&mut NoopObserver);
//! ```

pub mod driver;
pub mod error;
pub mod observer;
pub mod state;


pub use driver::SimulationDriver;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, Rejection, RunObserver};
pub use state::{Checkpoint, RunStatus, SimulationRunState};
