//! JSON result and checkpoint files keyed by calendar date.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use serde::Serialize;
use serde::de::DeserializeOwned;

use ev_sim::{Checkpoint, SimulationRunState};

use crate::{OutputResult, RunWriter};

/// Writes `outcomes_DD_MM_YYYY.json` and, for halted runs,
/// `route_DD_MM_YYYY.json`.
pub struct JsonWriter {
    dir:  PathBuf,
    date: NaiveDate,
}

impl JsonWriter {
    /// Writer for today's local date.  Creates `dir` if needed.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        Self::with_date(dir, Local::now().date_naive())
    }

    /// Writer keyed by an explicit date.
    pub fn with_date(dir: &Path, date: NaiveDate) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self { dir: dir.to_path_buf(), date })
    }

    pub fn result_path(&self) -> PathBuf {
        self.dir.join(format!("outcomes_{}.json", self.date_key()))
    }

    pub fn checkpoint_path(&self) -> PathBuf {
        self.dir.join(format!("route_{}.json", self.date_key()))
    }

    fn date_key(&self) -> String {
        self.date.format("%d_%m_%Y").to_string()
    }
}

impl RunWriter for JsonWriter {
    fn write_checkpoint(&mut self, checkpoint: &Checkpoint) -> OutputResult<()> {
        let path = self.checkpoint_path();
        write_json(&path, checkpoint)?;
        tracing::info!(path = %path.display(), "checkpoint written");
        Ok(())
    }

    fn write_result(&mut self, state: &SimulationRunState) -> OutputResult<()> {
        let path = self.result_path();
        write_json(&path, state)?;
        tracing::info!(path = %path.display(), "run result written");
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        Ok(())
    }
}

/// Load a result file written by [`JsonWriter`].
pub fn read_result(path: &Path) -> OutputResult<SimulationRunState> {
    read_json(path)
}

/// Load a checkpoint file written by [`JsonWriter`].
pub fn read_checkpoint(path: &Path) -> OutputResult<Checkpoint> {
    read_json(path)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> OutputResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, value)?;
    out.flush()?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> OutputResult<T> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
