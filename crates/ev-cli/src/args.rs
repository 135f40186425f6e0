//! Command-line flags and config-file loading.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use ev_core::SimConfig;

#[derive(Parser, Debug)]
#[command(name = "evreach")]
#[command(about = "Monte-Carlo EV round-trip stranding simulator and charger siting")]
pub struct Cli {
    /// JSON file with simulation settings; missing keys take their defaults.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Road network CSV (`segment_id,level,seq,x,y`) in the network CRS.
    #[arg(long, value_name = "FILE")]
    pub network: PathBuf,

    /// Pre-built charging stations CSV (`x,y,charger_count`) in the routing CRS.
    #[arg(long, value_name = "FILE", required_unless_present = "resume")]
    pub stations: Option<PathBuf>,

    /// Continue from the registry of an earlier `outcomes_*.json` result.
    #[arg(long, value_name = "FILE", conflicts_with = "stations")]
    pub resume: Option<PathBuf>,

    /// Routing service base URL.
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Number of accepted trips to simulate.
    #[arg(long)]
    pub samples: Option<u64>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory for result, checkpoint, and CSV files.
    #[arg(long, value_name = "DIR", default_value = "output")]
    pub output: PathBuf,

    /// Console log level; `RUST_LOG` takes precedence when set.
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Cli {
    /// The config file (or defaults) with command-line overrides applied.
    pub fn load_config(&self) -> Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => SimConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut SimConfig) {
        if let Some(endpoint) = &self.endpoint {
            config.routing_endpoint = endpoint.clone();
        }
        if let Some(samples) = self.samples {
            config.sample_count = samples;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
    }
}

fn read_config(path: &Path) -> Result<SimConfig> {
    let file = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing config {}", path.display()))
}

/// Console verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
