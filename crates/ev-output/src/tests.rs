//! Unit tests for ev-output.  Every test writes into its own temporary
//! directory.

#[cfg(test)]
mod helpers {
    use chrono::NaiveDate;

    use ev_core::{Crs, FailureKind, Location, Point, SegmentId, SourceKind, StationId};
    use ev_routing::DistanceProfile;
    use ev_sim::{Checkpoint, RunStatus, SimulationRunState};
    use ev_spatial::ChargerRecord;

    pub fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 5).unwrap()
    }

    pub fn records() -> Vec<ChargerRecord> {
        vec![
            ChargerRecord {
                id:            StationId(0),
                location:      Point::wgs84(-105.0, 40.0),
                charger_count: 2,
                source:        SourceKind::PreBuilt,
                failure:       None,
            },
            ChargerRecord {
                id:            StationId(1),
                location:      Point::wgs84(-104.5, 39.5),
                charger_count: 4,
                source:        SourceKind::Proposed,
                failure:       Some(FailureKind::OutOfRange),
            },
        ]
    }

    pub fn state(status: RunStatus) -> SimulationRunState {
        SimulationRunState { registry: records(), outcomes: vec![0, 1, 0], status }
    }

    pub fn checkpoint() -> Checkpoint {
        let route = DistanceProfile::from_path(
            vec![Point::wgs84(-105.0, 40.0), Point::wgs84(-104.5, 40.0)],
            &[42_000.0],
        )
        .unwrap()
        .round_trip();
        Checkpoint {
            registry:    records(),
            origin:      Location::new(SegmentId(3), Point::wgs84(-105.0, 40.0)),
            destination: Location::new(SegmentId(9), Point::new(500_000.0, 4_400_000.0, Crs::Utm { zone: 13, north: true })),
            route,
            error:       "routing failed mid-trip".into(),
        }
    }
}

// ── JSON ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod json {
    use ev_sim::RunStatus;

    use super::helpers::{checkpoint, date, state};
    use crate::{JsonWriter, RunWriter, read_checkpoint, read_result};

    #[test]
    fn file_names_carry_the_date() {
        let dir = tempfile::tempdir().unwrap();
        let w = JsonWriter::with_date(dir.path(), date()).unwrap();
        assert_eq!(w.result_path(), dir.path().join("outcomes_05_03_2026.json"));
        assert_eq!(w.checkpoint_path(), dir.path().join("route_05_03_2026.json"));
    }

    #[test]
    fn result_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = JsonWriter::with_date(dir.path(), date()).unwrap();
        let written = state(RunStatus::Halted { reason: "cap".into() });
        w.write_result(&written).unwrap();

        let read = read_result(&w.result_path()).unwrap();
        assert_eq!(read, written);
        assert!(!w.checkpoint_path().exists());
    }

    #[test]
    fn result_layout() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = JsonWriter::with_date(dir.path(), date()).unwrap();
        w.write_result(&state(RunStatus::Completed)).unwrap();

        let text = std::fs::read_to_string(w.result_path()).unwrap();
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["outcomes"], serde_json::json!([0, 1, 0]));
        assert_eq!(v["status"]["kind"], "completed");
        assert_eq!(v["registry"][1]["source"], "proposed");
        assert_eq!(v["registry"][1]["failure"], "out_of_range");
        assert_eq!(v["registry"][0]["location"]["crs"]["kind"], "wgs84");
    }

    #[test]
    fn checkpoint_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = JsonWriter::with_date(dir.path(), date()).unwrap();
        let written = checkpoint();
        w.write_checkpoint(&written).unwrap();

        let read = read_checkpoint(&w.checkpoint_path()).unwrap();
        assert_eq!(read, written);
        assert_eq!(read.route.len(), 3);
        assert_eq!(read.route.turnaround(), Some(1));
    }

    #[test]
    fn checkpoint_with_empty_route_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = JsonWriter::with_date(dir.path(), date()).unwrap();
        w.write_checkpoint(&checkpoint()).unwrap();

        let path = w.checkpoint_path();
        let mut value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        value["route"]["steps"] = serde_json::json!([]);
        value["route"]["turnaround"] = serde_json::Value::Null;
        std::fs::write(&path, value.to_string()).unwrap();

        assert!(matches!(read_checkpoint(&path), Err(crate::OutputError::Json(_))));
    }

    #[test]
    fn same_date_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = JsonWriter::with_date(dir.path(), date()).unwrap();
        w.write_result(&state(RunStatus::Completed)).unwrap();
        let mut second = state(RunStatus::Completed);
        second.outcomes = vec![1];
        w.write_result(&second).unwrap();

        assert_eq!(read_result(&w.result_path()).unwrap().outcomes, [1]);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("runs").join("today");
        let mut w = JsonWriter::with_date(&nested, date()).unwrap();
        w.write_result(&state(RunStatus::Completed)).unwrap();
        assert!(nested.join("outcomes_05_03_2026.json").exists());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_result(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, crate::OutputError::Io(_)));
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_export {
    use ev_sim::RunStatus;

    use super::helpers::{checkpoint, records, state};
    use crate::{CsvWriter, RunWriter, StationRow};

    #[test]
    fn station_row_flattens_record() {
        let recs = records();
        let row = StationRow::from(&recs[1]);
        assert_eq!(row.station_id, 1);
        assert_eq!(row.epsg, 4326);
        assert_eq!(row.source, "proposed");
        assert_eq!(row.failure, "out_of_range");
        assert_eq!(StationRow::from(&recs[0]).failure, "");
    }

    #[test]
    fn writes_stations_and_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_result(&state(RunStatus::Completed)).unwrap();
        w.finish().unwrap();

        let stations = std::fs::read_to_string(w.stations_path()).unwrap();
        let lines: Vec<&str> = stations.lines().collect();
        assert_eq!(lines[0], "station_id,x,y,epsg,charger_count,source,failure");
        assert_eq!(lines[1], "0,-105,40,4326,2,pre_built,");
        assert_eq!(lines[2], "1,-104.5,39.5,4326,4,proposed,out_of_range");
        assert_eq!(lines.len(), 3);

        let outcomes = std::fs::read_to_string(w.outcomes_path()).unwrap();
        assert_eq!(outcomes, "attempt,stranded\n1,0\n2,1\n3,0\n");
    }

    #[test]
    fn checkpoint_is_not_exported() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_checkpoint(&checkpoint()).unwrap();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer {
    use ev_sim::{Checkpoint, RunObserver, RunStatus, SimulationRunState};

    use super::helpers::{checkpoint, date, state};
    use crate::{CsvWriter, JsonWriter, OutputError, OutputResult, RunOutputObserver, RunWriter};

    /// Fails every call and counts them.
    #[derive(Default)]
    struct Broken {
        calls: usize,
    }

    impl Broken {
        fn fail(&mut self, what: &str) -> OutputResult<()> {
            self.calls += 1;
            Err(OutputError::Io(std::io::Error::other(what.to_string())))
        }
    }

    impl RunWriter for Broken {
        fn write_checkpoint(&mut self, _c: &Checkpoint) -> OutputResult<()> {
            self.fail("checkpoint")
        }

        fn write_result(&mut self, _s: &SimulationRunState) -> OutputResult<()> {
            self.fail("result")
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.fail("finish")
        }
    }

    #[test]
    fn halted_run_writes_checkpoint_and_result() {
        let dir = tempfile::tempdir().unwrap();
        let writers = (
            JsonWriter::with_date(dir.path(), date()).unwrap(),
            CsvWriter::new(dir.path()).unwrap(),
        );
        let mut obs = RunOutputObserver::new(writers);
        obs.on_halt(&checkpoint());
        obs.on_run_end(&state(RunStatus::Halted { reason: "routing failed mid-trip".into() }));
        assert!(obs.take_error().is_none());

        let (json, csv) = obs.into_writer();
        assert!(json.checkpoint_path().exists());
        assert!(json.result_path().exists());
        assert!(csv.stations_path().exists());
        assert!(csv.outcomes_path().exists());
    }

    #[test]
    fn completed_run_writes_no_checkpoint() {
        let dir = tempfile::tempdir().unwrap();
        let mut obs = RunOutputObserver::new(JsonWriter::with_date(dir.path(), date()).unwrap());
        obs.on_run_end(&state(RunStatus::Completed));
        let json = obs.into_writer();
        assert!(json.result_path().exists());
        assert!(!json.checkpoint_path().exists());
    }

    #[test]
    fn first_error_is_kept() {
        let mut obs = RunOutputObserver::new(Broken::default());
        obs.on_halt(&checkpoint());
        obs.on_run_end(&state(RunStatus::Completed));

        let err = obs.take_error().unwrap();
        assert_eq!(err.to_string(), "I/O error: checkpoint");
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().calls, 3);
    }

    #[test]
    fn pair_runs_second_writer_after_first_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut pair = (Broken::default(), CsvWriter::new(dir.path()).unwrap());
        assert!(pair.write_result(&state(RunStatus::Completed)).is_err());
        assert!(pair.1.outcomes_path().exists());
    }
}
