//! Unit tests for ev-trip.
//!
//! Routing goes through [`helpers::LineService`], which answers every
//! request with a straight line cut into equal pieces, so every distance in
//! these tests can be worked out by hand.  Everything lives in UTM 13N, so
//! no reprojection rounding creeps in.

#[cfg(test)]
mod helpers {
    use std::cell::RefCell;

    use ev_core::{AvailabilityPolicy, CountSampler, Crs, Point, SimConfig};
    use ev_routing::{DistanceProfile, FetchError, RawRoute, RouteService};

    pub const UTM13N: Crs = Crs::Utm { zone: 13, north: true };

    pub fn at(dx: f64, dy: f64) -> Point {
        Point::new(500_000.0 + dx, 4_400_000.0 + dy, UTM13N)
    }

    /// Straight-line router.  Pieces are at most `step_m` long.
    pub struct LineService {
        step_m:   f64,
        fail:     bool,
        requests: RefCell<Vec<(Point, Point)>>,
    }

    impl LineService {
        pub fn new(step_m: f64) -> Self {
            Self { step_m, fail: false, requests: RefCell::new(Vec::new()) }
        }

        /// Every request is answered with one segment.
        pub fn single() -> Self {
            Self::new(f64::INFINITY)
        }

        pub fn failing() -> Self {
            Self { fail: true, ..Self::single() }
        }

        pub fn requests(&self) -> Vec<(Point, Point)> {
            self.requests.borrow().clone()
        }
    }

    impl RouteService for LineService {
        fn fetch(&self, from: Point, to: Point) -> Result<RawRoute, FetchError> {
            self.requests.borrow_mut().push((from, to));
            if self.fail {
                return Err(FetchError::Status(503));
            }
            let d = from.planar_distance_m(to);
            let n = ((d / self.step_m).ceil() as usize).max(1);
            let mut coordinates: Vec<[f64; 2]> = (0..n)
                .map(|i| {
                    [
                        from.x + (to.x - from.x) * i as f64 / n as f64,
                        from.y + (to.y - from.y) * i as f64 / n as f64,
                    ]
                })
                .collect();
            coordinates.push([to.x, to.y]);
            Ok(RawRoute { coordinates, annotations: vec![d / n as f64; n], distance_m: d })
        }
    }

    /// Replays `draws`, repeating the last one forever.
    pub struct ScriptedSampler {
        draws: Vec<u32>,
        taken: usize,
    }

    impl ScriptedSampler {
        pub fn new(draws: &[u32]) -> Self {
            Self { draws: draws.to_vec(), taken: 0 }
        }

        pub fn taken(&self) -> usize {
            self.taken
        }
    }

    impl CountSampler for ScriptedSampler {
        fn draw(&mut self, _mean: f64) -> u32 {
            let v = self.draws[self.taken.min(self.draws.len() - 1)];
            self.taken += 1;
            v
        }
    }

    /// Full range and an absolute low-fuel threshold, one draw per check.
    pub fn config(full_range_m: f64, threshold_m: f64) -> SimConfig {
        SimConfig {
            full_range_m,
            low_fuel_fraction: threshold_m / full_range_m,
            availability: AvailabilityPolicy::DecideOnce,
            ..SimConfig::default()
        }
    }

    /// `[0, 100, 100, 100]` heading east from `at(0, 0)`.
    pub fn east_300() -> DistanceProfile {
        DistanceProfile::from_path(
            vec![at(0.0, 0.0), at(100.0, 0.0), at(200.0, 0.0), at(300.0, 0.0)],
            &[100.0, 100.0, 100.0],
        )
        .unwrap()
    }
}

// ── Availability ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod availability {
    use ev_core::{AvailabilityPolicy, PoissonSampler, SimRng};

    use super::helpers::ScriptedSampler;
    use crate::{Availability, check_availability};

    #[test]
    fn decide_once_takes_one_draw() {
        let mut s = ScriptedSampler::new(&[3, 0]);
        let a = check_availability(&mut s, AvailabilityPolicy::DecideOnce, 2.0, 2);
        assert_eq!(a, Availability { available: false, draws: 1 });
        assert_eq!(s.taken(), 1);
    }

    #[test]
    fn draw_must_be_strictly_below_capacity() {
        let mut full = ScriptedSampler::new(&[2]);
        assert!(!check_availability(&mut full, AvailabilityPolicy::DecideOnce, 2.0, 2).available);
        let mut free = ScriptedSampler::new(&[1]);
        assert!(check_availability(&mut free, AvailabilityPolicy::DecideOnce, 2.0, 2).available);
    }

    #[test]
    fn bounded_redraws_within_budget() {
        let mut s = ScriptedSampler::new(&[5, 5, 1]);
        let a = check_availability(&mut s, AvailabilityPolicy::Bounded { max_draws: 3 }, 2.0, 2);
        assert_eq!(a, Availability { available: true, draws: 3 });

        let mut s = ScriptedSampler::new(&[5, 5, 1]);
        let a = check_availability(&mut s, AvailabilityPolicy::Bounded { max_draws: 2 }, 2.0, 2);
        assert_eq!(a, Availability { available: false, draws: 2 });
    }

    #[test]
    fn bounded_zero_still_draws_once() {
        let mut s = ScriptedSampler::new(&[0]);
        let a = check_availability(&mut s, AvailabilityPolicy::Bounded { max_draws: 0 }, 2.0, 1);
        assert_eq!(a, Availability { available: true, draws: 1 });
    }

    #[test]
    fn unbounded_stops_at_first_clear_draw() {
        let mut s = ScriptedSampler::new(&[9, 9, 9, 9, 0]);
        let a = check_availability(&mut s, AvailabilityPolicy::Unbounded, 2.0, 1);
        assert_eq!(a, Availability { available: true, draws: 5 });
    }

    #[test]
    fn idle_station_is_available() {
        let mut s = PoissonSampler::new(SimRng::new(3));
        let a = check_availability(&mut s, AvailabilityPolicy::DecideOnce, 0.0, 1);
        assert!(a.available);
    }
}

// ── Simulator ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod simulator {
    use ev_core::{
        AvailabilityPolicy, FailureKind, Location, PoissonSampler, SegmentId, SimRng,
    };
    use ev_routing::{RetryPolicy, RoutingClient, RoutingError};
    use ev_spatial::ChargerRegistry;

    use super::helpers::{LineService, ScriptedSampler, UTM13N, at, config, east_300};
    use crate::{TripError, TripOutcome, TripPhase, TripSimulator};

    fn origin() -> Location {
        Location::new(SegmentId(0), at(0.0, 0.0))
    }

    fn destination() -> Location {
        Location::new(SegmentId(1), at(300.0, 0.0))
    }

    fn registry(stations: &[(f64, f64, u32)]) -> ChargerRegistry {
        let mut r = ChargerRegistry::new(UTM13N);
        for &(dx, dy, count) in stations {
            r.add_prebuilt(at(dx, dy), count).unwrap();
        }
        r
    }

    fn client(service: &LineService) -> RoutingClient<&LineService> {
        RoutingClient::new(service, UTM13N, RetryPolicy::no_pause(4))
    }

    #[test]
    fn low_fuel_detour_is_issued_before_segment_three() {
        let service = LineService::single();
        let client = client(&service);
        let reg = registry(&[(200.0, 10.0, 1)]);
        let cfg = config(250.0, 80.0);
        let mut sampler = ScriptedSampler::new(&[0]);

        let report = TripSimulator::new(&client, &reg, &cfg, &mut sampler)
            .simulate(&east_300(), &origin(), &destination())
            .unwrap();

        let station = at(200.0, 10.0);
        let requests = service.requests();
        // After segment 2 range is 50 < 80: the first request leaves from
        // the segment-2 point, not the segment-3 point.
        assert_eq!(requests[0], (at(200.0, 0.0), station));
        assert_eq!(requests[1], (station, at(300.0, 0.0)));
        assert_eq!(requests[2], (at(300.0, 0.0), at(0.0, 0.0)));
        // 149.5 m of range cannot cover the 300 m return leg; the second
        // detour starts with no range left.
        assert_eq!(requests[3], (at(0.0, 0.0), station));
        assert_eq!(requests.len(), 4);

        assert_eq!(
            report.outcome,
            TripOutcome::Failure { kind: FailureKind::OutOfRange, location: at(0.0, 0.0) }
        );
        assert_eq!(report.phase, TripPhase::Stranded);
        assert_eq!(report.detours, 2);
    }

    #[test]
    fn round_trip_within_range_completes_without_routing() {
        let service = LineService::single();
        let client = client(&service);
        let reg = registry(&[]);
        let cfg = config(1_000.0, 250.0);
        let mut sampler = ScriptedSampler::new(&[0]);

        let report = TripSimulator::new(&client, &reg, &cfg, &mut sampler)
            .simulate(&east_300().round_trip(), &origin(), &destination())
            .unwrap();

        assert_eq!(report.outcome, TripOutcome::Success);
        assert_eq!(report.phase, TripPhase::Completed);
        assert_eq!(report.detours, 0);
        assert_eq!(report.driven_m, 500.0);
        assert_eq!(report.final_range_m, 500.0);
        assert!(service.requests().is_empty());
    }

    #[test]
    fn one_way_profile_routes_back_to_origin() {
        let service = LineService::new(100.0);
        let client = client(&service);
        let reg = registry(&[]);
        let cfg = config(1_000.0, 100.0);
        let mut sampler = ScriptedSampler::new(&[0]);

        let report = TripSimulator::new(&client, &reg, &cfg, &mut sampler)
            .simulate(&east_300(), &origin(), &destination())
            .unwrap();

        assert_eq!(service.requests(), [(at(300.0, 0.0), at(0.0, 0.0))]);
        assert_eq!(report.outcome, TripOutcome::Success);
        assert_eq!(report.driven_m, 600.0);
        assert_eq!(report.final_range_m, 400.0);
    }

    #[test]
    fn busy_station_strands_where_range_runs_out() {
        let service = LineService::single();
        let client = client(&service);
        let reg = registry(&[(200.0, 10.0, 1)]);
        let cfg = config(250.0, 80.0);
        let mut sampler = ScriptedSampler::new(&[5]);

        let report = TripSimulator::new(&client, &reg, &cfg, &mut sampler)
            .simulate(&east_300(), &origin(), &destination())
            .unwrap();

        assert_eq!(
            report.outcome,
            TripOutcome::Failure { kind: FailureKind::ChargersUnavailable, location: at(300.0, 0.0) }
        );
        assert_eq!(sampler.taken(), 2);
        assert!(service.requests().is_empty());
    }

    #[test]
    fn empty_registry_means_no_charger() {
        let service = LineService::single();
        let client = client(&service);
        let reg = registry(&[]);
        let cfg = config(250.0, 80.0);
        let mut sampler = ScriptedSampler::new(&[0]);

        let report = TripSimulator::new(&client, &reg, &cfg, &mut sampler)
            .simulate(&east_300(), &origin(), &destination())
            .unwrap();

        assert!(matches!(
            report.outcome,
            TripOutcome::Failure { kind: FailureKind::ChargersUnavailable, .. }
        ));
        assert_eq!(sampler.taken(), 0);
    }

    #[test]
    fn distant_charger_strands_on_the_detour() {
        let service = LineService::new(250.0);
        let client = client(&service);
        let reg = registry(&[(200.0, 1_000.0, 2)]);
        let cfg = config(250.0, 80.0);
        let mut sampler = ScriptedSampler::new(&[0]);

        let report = TripSimulator::new(&client, &reg, &cfg, &mut sampler)
            .simulate(&east_300(), &origin(), &destination())
            .unwrap();

        // 50 m of range left, first 250 m piece toward the station.
        assert_eq!(
            report.outcome,
            TripOutcome::Failure { kind: FailureKind::OutOfRange, location: at(200.0, 250.0) }
        );
        assert_eq!(report.detours, 1);
        assert!(report.final_range_m <= 0.0);
    }

    #[test]
    fn recharging_along_the_way_completes_the_trip() {
        let service = LineService::new(100.0);
        let client = client(&service);
        let reg = registry(&[(0.0, 0.0, 1), (100.0, 0.0, 1), (200.0, 0.0, 1), (300.0, 0.0, 1)]);
        let cfg = config(250.0, 80.0);
        let mut sampler = ScriptedSampler::new(&[0]);

        let report = TripSimulator::new(&client, &reg, &cfg, &mut sampler)
            .simulate(&east_300(), &origin(), &destination())
            .unwrap();

        assert_eq!(report.outcome, TripOutcome::Success);
        assert_eq!(report.detours, 3);
        assert_eq!(report.driven_m, 600.0);
        assert_eq!(report.final_range_m, 250.0);

        let (o, p2, d) = (at(0.0, 0.0), at(200.0, 0.0), at(300.0, 0.0));
        assert_eq!(
            service.requests(),
            [(p2, p2), (p2, d), (d, o), (p2, p2), (p2, o), (o, o), (o, o)]
        );
    }

    #[test]
    fn recharge_on_the_way_back_heads_home() {
        // Round trip 0 → 300 → 0.  Range runs low at index 4, the 200 m
        // point after the turnaround, where a charger sits.
        let service = LineService::single();
        let client = client(&service);
        let reg = registry(&[(200.0, 0.0, 1)]);
        let cfg = config(450.0, 120.0);
        let mut sampler = ScriptedSampler::new(&[0]);

        let report = TripSimulator::new(&client, &reg, &cfg, &mut sampler)
            .simulate(&east_300().round_trip(), &origin(), &destination())
            .unwrap();

        let (o, station) = (at(0.0, 0.0), at(200.0, 0.0));
        assert_eq!(service.requests(), [(station, station), (station, o)]);
        assert_eq!(report.outcome, TripOutcome::Success);
        assert_eq!(report.phase, TripPhase::Completed);
        assert_eq!(report.detours, 1);
        assert_eq!(report.driven_m, 600.0);
        assert_eq!(report.final_range_m, 250.0);
    }

    #[test]
    fn detour_cap_is_an_error() {
        let service = LineService::new(100.0);
        let client = client(&service);
        let reg = registry(&[(0.0, 0.0, 1), (100.0, 0.0, 1), (200.0, 0.0, 1), (300.0, 0.0, 1)]);
        let cfg = ev_core::SimConfig { max_detours_per_trip: 2, ..config(250.0, 80.0) };
        let mut sampler = ScriptedSampler::new(&[0]);

        let err = TripSimulator::new(&client, &reg, &cfg, &mut sampler)
            .simulate(&east_300(), &origin(), &destination())
            .unwrap_err();
        assert!(matches!(err, TripError::TooManyDetours { limit: 2 }));
    }

    #[test]
    fn routing_failure_mid_detour_is_an_error() {
        let service = LineService::failing();
        let client = client(&service);
        let reg = registry(&[(200.0, 10.0, 1)]);
        let cfg = config(250.0, 80.0);
        let mut sampler = ScriptedSampler::new(&[0]);

        let err = TripSimulator::new(&client, &reg, &cfg, &mut sampler)
            .simulate(&east_300(), &origin(), &destination())
            .unwrap_err();
        assert!(matches!(err, TripError::Routing(RoutingError::Unavailable { attempts: 4, .. })));
        assert_eq!(service.requests().len(), 4);
    }

    #[test]
    fn never_completes_with_negative_range() {
        let reg = registry(&[(0.0, 0.0, 1), (150.0, 0.0, 2), (300.0, 0.0, 1)]);
        for seed in 0..40 {
            let service = LineService::new(50.0);
            let client = client(&service);
            let cfg = ev_core::SimConfig {
                availability: AvailabilityPolicy::Bounded { max_draws: 3 },
                ..config(250.0, 80.0)
            };
            let mut sampler = PoissonSampler::new(SimRng::new(seed));

            let report = TripSimulator::new(&client, &reg, &cfg, &mut sampler)
                .simulate(&east_300().round_trip(), &origin(), &destination())
                .unwrap();

            assert!(report.phase.is_terminal());
            match report.outcome {
                TripOutcome::Success => {
                    assert_eq!(report.phase, TripPhase::Completed);
                    assert!(report.final_range_m >= 0.0, "seed {seed}: {}", report.final_range_m);
                }
                TripOutcome::Failure { .. } => assert_eq!(report.phase, TripPhase::Stranded),
            }
        }
    }

    #[test]
    fn outcome_flags() {
        assert_eq!(TripOutcome::Success.as_flag(), 0);
        let f = TripOutcome::Failure { kind: FailureKind::OutOfRange, location: at(0.0, 0.0) };
        assert_eq!(f.as_flag(), 1);
        assert!(f.is_failure());
    }
}
