//! The `SimulationDriver` and its attempt loop.

use ev_core::{CountSampler, SimConfig};
use ev_routing::{RouteService, RoutingClient, RoutingError};
use ev_spatial::{ChargerRegistry, PointProvider, SpatialError};
use ev_trip::{TripOutcome, TripSimulator};

use crate::{Checkpoint, Rejection, RunObserver, RunStatus, SimResult, SimulationRunState};

/// Monte-Carlo driver.
///
/// Owns the registry and the outcome log for the whole run; trip simulators
/// borrow the registry read-only while a trip runs.
///
/// # Type parameters
///
/// - `S: RouteService` — routing backend behind the [`RoutingClient`]
/// - `P: PointProvider` — source of trip endpoints
/// - `C: CountSampler` — charger-occupancy draws
pub struct SimulationDriver<S, P, C> {
    config:   SimConfig,
    client:   RoutingClient<S>,
    provider: P,
    registry: ChargerRegistry,
    sampler:  C,
    outcomes: Vec<u8>,
}

impl<S: RouteService, P: PointProvider, C: CountSampler> SimulationDriver<S, P, C> {
    /// Validate `config` and assemble a driver around `registry`.
    pub fn new(
        config:   SimConfig,
        client:   RoutingClient<S>,
        provider: P,
        registry: ChargerRegistry,
        sampler:  C,
    ) -> SimResult<Self> {
        config.validate()?;
        Ok(Self { config, client, provider, registry, sampler, outcomes: Vec::new() })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn client(&self) -> &RoutingClient<S> {
        &self.client
    }

    pub fn registry(&self) -> &ChargerRegistry {
        &self.registry
    }

    /// Outcome log so far: `1` per stranding, `0` per completed trip.
    pub fn outcomes(&self) -> &[u8] {
        &self.outcomes
    }

    pub fn into_registry(self) -> ChargerRegistry {
        self.registry
    }

    /// Simulate `config.sample_count` accepted attempts.
    ///
    /// Returns the run's final state, also passed to
    /// [`RunObserver::on_run_end`].  Every way out of the loop goes through
    /// `on_run_end`, so the registry and outcome log gathered so far are
    /// always handed to the observer.
    ///
    /// - A candidate whose end point cannot be sampled, whose round trip
    ///   cannot be routed, or whose round trip is too short is discarded.
    ///   A streak of `config.max_consecutive_rejections` discards halts the
    ///   run.
    /// - A trip that cannot be simulated halts the run after
    ///   [`RunObserver::on_halt`] receives its checkpoint.
    /// - Failures outside any single trip (no start segments at all,
    ///   coordinate conversion) halt the run without a checkpoint.
    ///
    /// Calling `run` again continues with the same registry and outcome log.
    pub fn run<O: RunObserver>(&mut self, observer: &mut O) -> SimulationRunState {
        let target_m = self.config.target_trip_distance_m;
        let mut accepted: u64 = 0;
        let mut rejected_in_row: u64 = 0;

        let status = loop {
            if accepted >= self.config.sample_count {
                break RunStatus::Completed;
            }
            if rejected_in_row >= self.config.max_consecutive_rejections {
                break halted(format!("{rejected_in_row} consecutive candidate trips rejected"));
            }

            let origin = match self.provider.start_location() {
                Ok(origin) => origin,
                Err(SpatialError::EmptySegment(segment)) => {
                    let reason = format!("start segment {segment} has no vertices");
                    reject(observer, Rejection::NoEndpoint { reason });
                    rejected_in_row += 1;
                    continue;
                }
                Err(e) => break halted(format!("cannot sample a trip start: {e}")),
            };
            let destination = match self.provider.end_location(&origin, self.config.min_separation_m()) {
                Ok(destination) => destination,
                Err(e @ (SpatialError::NoCandidates(_) | SpatialError::EmptySegment(_))) => {
                    reject(observer, Rejection::NoEndpoint { reason: e.to_string() });
                    rejected_in_row += 1;
                    continue;
                }
                Err(e) => break halted(format!("cannot sample a trip end: {e}")),
            };

            let route = match self.client.compute_route(&origin, &destination, true) {
                Ok(route) => route,
                Err(e @ RoutingError::Core(_)) => break halted(format!("cannot route candidate trip: {e}")),
                Err(e) => {
                    reject(observer, Rejection::Unroutable { reason: e.to_string() });
                    rejected_in_row += 1;
                    continue;
                }
            };

            let total_m = route.total_distance_m();
            if total_m <= target_m {
                tracing::warn!(total_m, target_m, "round trip too short; discarding");
                observer.on_attempt_rejected(&Rejection::TooShort { total_m });
                rejected_in_row += 1;
                continue;
            }

            rejected_in_row = 0;
            accepted += 1;
            tracing::info!(attempt = accepted, of = self.config.sample_count, total_m, "simulation attempt");
            observer.on_attempt_accepted(accepted, &route);

            let result = TripSimulator::new(&self.client, &self.registry, &self.config, &mut self.sampler)
                .simulate(&route, &origin, &destination);

            let report = match result {
                Ok(report) => report,
                Err(e) => {
                    tracing::error!(attempt = accepted, error = %e, "trip simulation failed; writing checkpoint and halting");
                    let checkpoint = Checkpoint {
                        registry: self.registry.records().to_vec(),
                        origin,
                        destination,
                        route,
                        error: e.to_string(),
                    };
                    observer.on_halt(&checkpoint);
                    break RunStatus::Halted { reason: checkpoint.error };
                }
            };

            self.outcomes.push(report.outcome.as_flag());
            observer.on_outcome(accepted, &report);

            if let TripOutcome::Failure { kind, location } = report.outcome {
                let id = match self.registry.propose(location, kind, self.config.proposed_charger_count) {
                    Ok(id) => id,
                    Err(e) => break halted(format!("cannot propose a station at {location}: {e}")),
                };
                tracing::info!(station = %id, failure = %kind, %location, "new charger proposed");
                if let Some(record) = self.registry.get(id) {
                    observer.on_station_proposed(record);
                }
            }
        };

        let state = SimulationRunState {
            registry: self.registry.records().to_vec(),
            outcomes: self.outcomes.clone(),
            status,
        };
        tracing::info!(
            attempts = state.attempts(),
            failures = state.failures(),
            stations = state.registry.len(),
            completed = state.status.is_completed(),
            "run finished"
        );
        observer.on_run_end(&state);
        state
    }
}

fn reject<O: RunObserver>(observer: &mut O, rejection: Rejection) {
    tracing::warn!(?rejection, "candidate trip discarded");
    observer.on_attempt_rejected(&rejection);
}

fn halted(reason: String) -> RunStatus {
    tracing::error!(%reason, "halting run");
    RunStatus::Halted { reason }
}
