//! CSV export backend.
//!
//! Creates two files in the configured output directory when a run ends:
//! - `stations.csv` — every registry record
//! - `outcomes.csv` — the outcome log, one row per simulated trip

use std::fs;
use std::path::{Path, PathBuf};

use csv::Writer;

use ev_sim::{Checkpoint, SimulationRunState};

use crate::writer::RunWriter;
use crate::{OutcomeRow, OutputResult, StationRow};

/// Writes the registry and outcome log of a finished run as CSV.
pub struct CsvWriter {
    dir: PathBuf,
}

impl CsvWriter {
    /// Export into `dir`, creating it if needed.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self { dir: dir.to_path_buf() })
    }

    pub fn stations_path(&self) -> PathBuf {
        self.dir.join("stations.csv")
    }

    pub fn outcomes_path(&self) -> PathBuf {
        self.dir.join("outcomes.csv")
    }

    fn write_stations(&self, rows: impl Iterator<Item = StationRow>) -> OutputResult<()> {
        let mut w = Writer::from_path(self.stations_path())?;
        w.write_record(["station_id", "x", "y", "epsg", "charger_count", "source", "failure"])?;
        for row in rows {
            w.write_record(&[
                row.station_id.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.epsg.to_string(),
                row.charger_count.to_string(),
                row.source.to_string(),
                row.failure.to_string(),
            ])?;
        }
        w.flush()?;
        Ok(())
    }

    fn write_outcomes(&self, rows: impl Iterator<Item = OutcomeRow>) -> OutputResult<()> {
        let mut w = Writer::from_path(self.outcomes_path())?;
        w.write_record(["attempt", "stranded"])?;
        for row in rows {
            w.write_record(&[row.attempt.to_string(), row.stranded.to_string()])?;
        }
        w.flush()?;
        Ok(())
    }
}

impl RunWriter for CsvWriter {
    /// Checkpoints are JSON only.
    fn write_checkpoint(&mut self, _checkpoint: &Checkpoint) -> OutputResult<()> {
        Ok(())
    }

    fn write_result(&mut self, state: &SimulationRunState) -> OutputResult<()> {
        self.write_stations(state.registry.iter().map(StationRow::from))?;
        self.write_outcomes(
            state
                .outcomes
                .iter()
                .enumerate()
                .map(|(i, &stranded)| OutcomeRow { attempt: i as u64 + 1, stranded }),
        )
    }

    fn finish(&mut self) -> OutputResult<()> {
        Ok(())
    }
}
