//! evreach — Monte-Carlo EV round-trip stranding simulator.
//!
//! Samples round trips on a road network, drives each one through the trip
//! state machine against the charging-station registry, and proposes a new
//! station wherever a vehicle strands.  The final registry and outcome log
//! are written as date-keyed JSON plus CSV exports; a run that hits an
//! unexpected trip error also leaves a route checkpoint behind.
//!
//! ```text
//! evreach --network roads.csv --stations stations.csv \
//!         --endpoint http://localhost:5000 --samples 500 --output out/
//! ```

mod args;
mod logging;


use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::Parser;

use ev_core::{PoissonSampler, SimConfig, SimRng};
use ev_output::{CsvWriter, JsonWriter, RunOutputObserver, read_result};
use ev_routing::{OsrmService, RetryPolicy, RoutingClient};
use ev_sim::{RunStatus, SimulationDriver};
use ev_spatial::{ChargerRegistry, NetworkSampler, load_network_csv, load_stations_csv};

use args::Cli;

// Child RNG stream offsets.
const ENDPOINT_STREAM:  u64 = 1;
const OCCUPANCY_STREAM: u64 = 2;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.log_level)?;

    let config = cli.load_config()?;
    config.validate()?;

    // 1. Inputs.
    let network = load_network_csv(&cli.network, config.network_crs)
        .with_context(|| format!("loading road network {}", cli.network.display()))?;
    let registry = load_registry(&cli, &config)?;
    tracing::info!(
        segments = network.segment_count(),
        stations = registry.len(),
        proposed = registry.proposed_count(),
        "inputs loaded"
    );

    // 2. Routing.
    let service = OsrmService::new(
        &config.routing_endpoint,
        Duration::from_secs(config.routing_timeout_secs),
    )?;
    let client = RoutingClient::new(service, config.routing_crs, RetryPolicy::from_config(&config));
    tracing::info!(
        endpoint = client.service().endpoint(),
        attempts = client.retry_policy().max_attempts,
        crs = %client.crs(),
        "routing client ready"
    );

    // 3. Random streams.
    let mut root = SimRng::new(config.seed);
    let provider = NetworkSampler::new(
        &network,
        config.start_segment_level,
        config.routing_crs,
        root.child(ENDPOINT_STREAM),
    );
    let sampler = PoissonSampler::new(root.child(OCCUPANCY_STREAM));

    // 4. Output.
    let writers = (JsonWriter::new(&cli.output)?, CsvWriter::new(&cli.output)?);
    let mut observer = RunOutputObserver::new(writers);

    // 5. Run.
    let mut driver = SimulationDriver::new(config, client, provider, registry, sampler)?;
    let t0 = Instant::now();
    let state = driver.run(&mut observer);
    let elapsed = t0.elapsed();

    if let Some(e) = observer.take_error() {
        tracing::error!(error = %e, "failed to write run output");
    }

    println!("Simulation finished in {:.1} s", elapsed.as_secs_f64());
    println!("  trips simulated : {}", state.attempts());
    println!("  strandings      : {} ({:.1} %)", state.failures(), state.failure_rate() * 100.0);
    println!("  stations        : {}", state.registry.len());
    println!("  output          : {}", cli.output.display());

    if let RunStatus::Halted { reason } = state.status {
        bail!("run halted: {reason}");
    }
    Ok(())
}

/// Pre-built stations from CSV, or the full registry of an earlier result.
fn load_registry(cli: &Cli, config: &SimConfig) -> Result<ChargerRegistry> {
    if let Some(path) = &cli.resume {
        let prior = read_result(path).with_context(|| format!("reading result {}", path.display()))?;
        return Ok(ChargerRegistry::from_records(config.routing_crs, prior.registry)?);
    }
    let Some(path) = &cli.stations else {
        bail!("either --stations or --resume is required");
    };
    load_stations_csv(path, config.routing_crs, config.routing_crs)
        .with_context(|| format!("loading stations {}", path.display()))
}
