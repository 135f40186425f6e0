//! The trip state machine.
//!
//! # Walk
//!
//! The simulator walks the active [`DistanceProfile`] one step at a time,
//! subtracting each step's segment distance from the remaining range.
//!
//! - When range falls below the low-fuel threshold it looks up the nearest
//!   station and checks availability.  A free charger means a one-way detour
//!   there (which may strand the vehicle), a full recharge, and a fresh
//!   profile to the next target.  No free charger means driving on, unless
//!   range is already gone.
//! - On a round-trip profile the phase flips to `Returning` at the
//!   turnaround point.
//! - At the end of a profile while outbound, a fresh profile back to the
//!   origin is requested; at the end while returning, the trip is complete.
//!
//! After a recharge the next target is the destination if the vehicle was
//! still outbound with outbound distance left on its profile, and the origin
//! otherwise.  A vehicle already past the turnaround is never sent back to
//! the destination.
//!
//! A round-trip profile already carries the way home, so reaching its
//! turnaround only flips the phase; no separate route back to the origin is
//! requested.  That request is made only when a one-way profile (the route
//! left by a recharge while outbound) ends at the destination.
//!
//! The simulator only reads the registry.  Turning a stranding into a
//! proposed station is the driver's job.

use ev_core::{CountSampler, FailureKind, Location, Point, SimConfig};
use ev_routing::{DistanceProfile, ProfileStep, RouteService, RoutingClient};
use ev_spatial::ChargerRegistry;

use crate::{TripError, TripOutcome, TripPhase, TripReport, TripResult, check_availability};

/// Simulates trips against a registry snapshot.
///
/// Borrow-only: build one per trip (or per batch of trips) while the driver
/// holds the registry immutably, then drop it before mutating the registry.
pub struct TripSimulator<'a, S, C> {
    client:   &'a RoutingClient<S>,
    registry: &'a ChargerRegistry,
    config:   &'a SimConfig,
    sampler:  C,
}

/// Mutable state of one trip.
struct Walk {
    profile:  DistanceProfile,
    index:    usize,
    phase:    TripPhase,
    range_m:  f64,
    driven_m: f64,
    detours:  u32,
}

enum Charge {
    /// Recharged at the station at this position.
    Refuelled(Point),
    /// No free charger; range remains, keep driving.
    Unavailable,
    Stranded(TripOutcome),
}

impl Walk {
    fn current(&self) -> TripResult<ProfileStep> {
        self.profile.step(self.index).copied().ok_or(TripError::EmptyProfile)
    }

    fn consume(&mut self, distance_m: f64) {
        self.range_m -= distance_m;
        self.driven_m += distance_m;
    }

    fn at_end(&self) -> bool {
        self.index + 1 >= self.profile.len()
    }

    /// Last index that still lies on the way out.
    fn outbound_end(&self) -> usize {
        self.profile.turnaround().unwrap_or(self.profile.len().saturating_sub(1))
    }

    fn follow(&mut self, profile: DistanceProfile) {
        self.profile = profile;
        self.index = 0;
    }

    fn finish(mut self, outcome: TripOutcome) -> TripReport {
        self.phase = match outcome {
            TripOutcome::Success => TripPhase::Completed,
            TripOutcome::Failure { .. } => TripPhase::Stranded,
        };
        TripReport {
            outcome,
            phase: self.phase,
            detours: self.detours,
            driven_m: self.driven_m,
            final_range_m: self.range_m,
        }
    }
}

impl<'a, S: RouteService, C: CountSampler> TripSimulator<'a, S, C> {
    pub fn new(
        client:   &'a RoutingClient<S>,
        registry: &'a ChargerRegistry,
        config:   &'a SimConfig,
        sampler:  C,
    ) -> Self {
        Self { client, registry, config, sampler }
    }

    /// Drive `route` from a full charge.
    ///
    /// `route` normally is the round trip `origin → destination → origin`;
    /// `origin` and `destination` are the re-route targets.
    pub fn simulate(
        &mut self,
        route:       &DistanceProfile,
        origin:      &Location,
        destination: &Location,
    ) -> TripResult<TripReport> {
        if route.is_empty() {
            return Err(TripError::EmptyProfile);
        }
        let threshold = self.config.low_fuel_threshold_m();
        let mut walk = Walk {
            profile:  route.clone(),
            index:    0,
            phase:    TripPhase::Outbound,
            range_m:  self.config.full_range_m,
            driven_m: 0.0,
            detours:  0,
        };
        let mut here = route.start();

        while walk.range_m > 0.0 {
            let step = walk.current()?;
            here = step.position;
            walk.consume(step.segment_m);

            if walk.range_m < threshold {
                match self.seek_charger(&mut walk, here)? {
                    Charge::Stranded(outcome) => return Ok(walk.finish(outcome)),
                    Charge::Unavailable => {}
                    Charge::Refuelled(station) => {
                        let target = if walk.phase == TripPhase::Outbound
                            && walk.index < walk.outbound_end()
                        {
                            destination.point
                        } else {
                            walk.phase = TripPhase::Returning;
                            origin.point
                        };
                        tracing::debug!(phase = %walk.phase, %station, %target, "re-routing after recharge");
                        walk.follow(self.client.route_between(station, target, false)?);
                        continue;
                    }
                }
            }

            if walk.phase == TripPhase::Outbound && walk.profile.turnaround() == Some(walk.index) {
                walk.phase = TripPhase::Returning;
            }

            if walk.at_end() {
                if walk.phase == TripPhase::Outbound {
                    tracing::debug!(%here, "destination reached; routing back to origin");
                    walk.follow(self.client.route_between(here, origin.point, false)?);
                    walk.phase = TripPhase::Returning;
                    continue;
                }
                return Ok(walk.finish(TripOutcome::Success));
            }

            walk.index += 1;
        }

        Ok(walk.finish(TripOutcome::Failure { kind: FailureKind::OutOfRange, location: here }))
    }

    /// Try to recharge at the station nearest `here`.
    fn seek_charger(&mut self, walk: &mut Walk, here: Point) -> TripResult<Charge> {
        let registry = self.registry;
        let nearest = registry.nearest(here)?;

        let station = match nearest {
            Some(rec) => {
                let check = check_availability(
                    &mut self.sampler,
                    self.config.availability,
                    self.config.poisson_mean,
                    rec.charger_count,
                );
                tracing::trace!(station = %rec.id, draws = check.draws, available = check.available, "availability check");
                check.available.then_some(rec)
            }
            None => None,
        };

        let Some(station) = station else {
            if walk.range_m <= 0.0 {
                return Ok(Charge::Stranded(TripOutcome::Failure {
                    kind:     FailureKind::ChargersUnavailable,
                    location: here,
                }));
            }
            return Ok(Charge::Unavailable);
        };

        let limit = self.config.max_detours_per_trip;
        if walk.detours >= limit {
            return Err(TripError::TooManyDetours { limit });
        }
        walk.detours += 1;
        tracing::debug!(station = %station.id, range_m = walk.range_m, %here, "detouring to charger");

        let path = self.client.route_between(here, station.location, false)?;
        for step in path.steps() {
            walk.consume(step.segment_m);
            if walk.range_m <= 0.0 {
                return Ok(Charge::Stranded(TripOutcome::Failure {
                    kind:     FailureKind::OutOfRange,
                    location: step.position,
                }));
            }
        }

        walk.range_m = self.config.full_range_m;
        Ok(Charge::Refuelled(station.location))
    }
}
