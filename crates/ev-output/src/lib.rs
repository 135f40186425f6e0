//! `ev-output` — persistence for simulation runs.
//!
//! | Writer        | Files created (in the output directory)                      |
//! |---------------|--------------------------------------------------------------|
//! | [`JsonWriter`]| `outcomes_DD_MM_YYYY.json` (result), `route_DD_MM_YYYY.json` (checkpoint, only on halt) |
//! | [`CsvWriter`] | `stations.csv`, `outcomes.csv`                               |
//!
//! File names carry the run's calendar date, so a second run on the same
//! day overwrites the first.  Move earlier outputs away to keep them.
//!
//! Writers implement [`RunWriter`] and are driven by [`RunOutputObserver`],
//! which implements `ev_sim::RunObserver`.  A pair of writers is itself a
//! writer.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ev_output::{CsvWriter, JsonWriter, RunOutputObserver};
//!
//! let writers = (JsonWriter::new(dir)?, CsvWriter::new(dir)?);
//! let mut obs = RunOutputObserver::new(writers);
//! driver.run(&mut obs);
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod json;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use self::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use json::{JsonWriter, read_checkpoint, read_result};
pub use observer::RunOutputObserver;
pub use row::{OutcomeRow, StationRow};
pub use writer::RunWriter;
