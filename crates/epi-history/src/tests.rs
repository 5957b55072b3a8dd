//! Unit tests for epi-history.

#[cfg(test)]
mod helpers {
    use epi_core::{AgentId, CompartmentId, Day, Position};

    use crate::HistoryLog;

    /// Four agents, horizon 3, labels S/I/R.
    ///
    /// Day 0: 0,1,2 in S; 3 in I.
    /// Day 1: 3 infects 0 and 1.
    /// Day 2: 0 infects 2; 3 recovers.
    pub fn sample_log(mobile: bool) -> HistoryLog {
        let labels = vec!["S".to_string(), "I".to_string(), "R".to_string()];
        let mut log = HistoryLog::new(Day(3), 4, labels, mobile);
        for a in 0..3 {
            log.record_state_change(AgentId(a), CompartmentId(0), Day(0));
        }
        log.record_state_change(AgentId(3), CompartmentId(1), Day(0));
        log.record_locations(Day(0), &positions(0.0));

        log.record_transmission(Day(1), AgentId(3), AgentId(0));
        log.record_transmission(Day(1), AgentId(3), AgentId(1));
        log.record_state_change(AgentId(0), CompartmentId(1), Day(1));
        log.record_state_change(AgentId(1), CompartmentId(1), Day(1));
        log.record_locations(Day(1), &positions(1.0));

        log.record_transmission(Day(2), AgentId(0), AgentId(2));
        log.record_state_change(AgentId(2), CompartmentId(1), Day(2));
        log.record_state_change(AgentId(3), CompartmentId(2), Day(2));
        log.record_locations(Day(2), &positions(2.0));
        log.record_locations(Day(3), &positions(3.0));
        log
    }

    pub fn positions(shift: f64) -> Vec<Position> {
        (0..4).map(|i| Position::new(i as f64 + shift, shift)).collect()
    }
}

#[cfg(test)]
mod queries {
    use epi_core::{AgentId, Day, EpiError, Position};

    use super::helpers::{positions, sample_log};
    use crate::{HistoryLog, Transmission};

    #[test]
    fn person_history_labels() {
        let log = sample_log(true);
        assert_eq!(log.person_history(AgentId(3)).unwrap(), vec![(Day(0), "I"), (Day(2), "R")]);
        assert_eq!(log.person_history(AgentId(2)).unwrap(), vec![(Day(0), "S"), (Day(2), "I")]);
    }

    #[test]
    fn unknown_agent_rejected() {
        let log = sample_log(true);
        let err = log.person_history(AgentId(4)).unwrap_err();
        assert_eq!(err, EpiError::AgentNotFound { agent: AgentId(4), population: 4 });
        assert!(log.person_transmissions(AgentId(99)).is_err());
    }

    #[test]
    fn history_with_movement_mobile() {
        let log = sample_log(true);
        let (hist, path) = log.person_history_with_movement(AgentId(1)).unwrap();
        assert_eq!(hist.len(), 2);
        assert_eq!(path.len(), 4);
        assert_eq!(path[2], Position::new(3.0, 2.0));
    }

    #[test]
    fn history_with_movement_static_is_one_point() {
        let log = sample_log(false);
        let (_, path) = log.person_history_with_movement(AgentId(1)).unwrap();
        assert_eq!(path, vec![Position::new(1.0, 0.0)]);
        assert_eq!(log.locations().len(), 1);
        assert_eq!(log.locations_on(Day(3)).unwrap()[1], Position::new(1.0, 0.0));
    }

    #[test]
    fn transmissions_by_day() {
        let log = sample_log(true);
        let all = log.transmissions();
        assert_eq!(all.len(), 3);
        assert_eq!(all[&Day(1)].len(), 2);
        assert!(all[&Day(3)].is_empty());
        assert_eq!(
            log.transmissions_on(Day(2)).unwrap(),
            &[Transmission { infector: AgentId(0), infectee: AgentId(2) }]
        );
        assert_eq!(log.total_transmissions(), 3);
    }

    #[test]
    fn day_zero_is_empty_and_valid() {
        assert!(sample_log(true).transmissions_on(Day(0)).unwrap().is_empty());
    }

    #[test]
    fn day_past_horizon_rejected() {
        let err = sample_log(true).transmissions_on(Day(4)).unwrap_err();
        assert_eq!(err, EpiError::DayOutOfRange { day: Day(4), horizon: Day(3) });
        assert!(sample_log(true).locations_on(Day(4)).is_err());
    }

    #[test]
    fn unrecorded_locations_rejected() {
        let labels = vec!["S".to_string(), "I".to_string()];
        let mut log = HistoryLog::new(Day(5), 4, labels, true);
        log.record_locations(Day(0), &positions(0.0));
        log.record_locations(Day(1), &positions(1.0));

        assert_eq!(log.locations_on(Day(1)).unwrap()[0], Position::new(1.0, 1.0));
        let err = log.locations_on(Day(3)).unwrap_err();
        assert_eq!(err, EpiError::DayOutOfRange { day: Day(3), horizon: Day(1) });
    }

    #[test]
    fn person_transmissions_filtered() {
        let log = sample_log(true);
        assert_eq!(
            log.person_transmissions(AgentId(3)).unwrap(),
            vec![(AgentId(0), Day(1)), (AgentId(1), Day(1))]
        );
        assert_eq!(log.person_transmissions(AgentId(0)).unwrap(), vec![(AgentId(2), Day(2))]);
        assert!(log.person_transmissions(AgentId(2)).unwrap().is_empty());
    }

    #[test]
    fn ranking_groups_ties_highest_first() {
        let log = sample_log(true);
        assert_eq!(log.transmission_counts(), vec![1, 0, 0, 2]);
        assert_eq!(
            log.ranked_transmitters(),
            vec![
                (2, vec![AgentId(3)]),
                (1, vec![AgentId(0)]),
                (0, vec![AgentId(1), AgentId(2)]),
            ]
        );
    }

    #[test]
    fn queries_do_not_mutate() {
        let log = sample_log(true);
        let _ = log.person_history(AgentId(7));
        let _ = log.transmissions_on(Day(10));
        assert_eq!(log.total_transmissions(), 3);
        assert_eq!(log.person_history(AgentId(0)).unwrap().len(), 2);
    }
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::helpers::sample_log;
    use crate::writer::HistoryWriter;
    use crate::{CsvWriter, TransmissionRow};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn read_all(dir: &TempDir, file: &str) -> (Vec<String>, Vec<csv::StringRecord>) {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        let rows = rdr.records().map(|r| r.unwrap()).collect();
        (headers, rows)
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("transmissions.csv").exists());
        assert!(dir.path().join("state_changes.csv").exists());
        assert!(dir.path().join("locations.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert_eq!(read_all(&dir, "transmissions.csv").0, ["day", "infector", "infectee"]);
        assert_eq!(read_all(&dir, "state_changes.csv").0, ["agent_id", "day", "compartment"]);
        assert_eq!(read_all(&dir, "locations.csv").0, ["day", "agent_id", "x", "y"]);
    }

    #[test]
    fn export_writes_every_ledger() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        sample_log(true).export(&mut w).unwrap();

        let (_, tx) = read_all(&dir, "transmissions.csv");
        assert_eq!(tx.len(), 3);
        assert_eq!(&tx[0][0], "1");
        assert_eq!(&tx[0][1], "3");
        assert_eq!(&tx[2][2], "2");

        let (_, sc) = read_all(&dir, "state_changes.csv");
        assert_eq!(sc.len(), 8);
        assert_eq!(&sc[7][0], "3");
        assert_eq!(&sc[7][2], "R");

        let (_, loc) = read_all(&dir, "locations.csv");
        assert_eq!(loc.len(), 16);
    }

    #[test]
    fn static_log_exports_one_snapshot() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        sample_log(false).export(&mut w).unwrap();
        assert_eq!(read_all(&dir, "locations.csv").1.len(), 4);
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_transmissions(&[TransmissionRow { day: 1, infector: 0, infectee: 1 }]).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
        assert_eq!(read_all(&dir, "transmissions.csv").1.len(), 1);
    }
}
