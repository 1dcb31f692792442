//! Polling a growing test data file for newly completed records.

use crate::error::TdrError;
use crate::spec::SpecLookup;
use crate::tdr::record_set::RecordSet;
use chrono::NaiveDateTime;
use std::time::Duration;

/// One poll: reload, and if the latest record's timestamp differs from
/// `last_seen`, return its failure report (empty for a passing record).
///
/// An empty table is "no data yet" and yields `Ok(None)`; any other error
/// propagates.
pub fn poll_once<S: SpecLookup>(
    set: &mut RecordSet<S>,
    last_seen: &mut Option<NaiveDateTime>,
) -> Result<Option<String>, TdrError> {
    let record = match set.latest_record() {
        Ok(record) => record,
        Err(TdrError::EmptyData { .. }) => {
            tracing::debug!(path = %set.path().display(), "no records yet");
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    if *last_seen == Some(record.timestamp) {
        return Ok(None);
    }
    *last_seen = Some(record.timestamp);

    tracing::info!(
        serial = record.serial.as_deref().unwrap_or("-"),
        status = record.status,
        "new record"
    );
    record.build_failure_report(set.spec()).map(Some)
}

/// Poll every `interval` and hand each new report to `emit`.
/// Stops after `max_polls` polls, or never when it is `None`.
pub fn run<S, F>(
    set: &mut RecordSet<S>,
    interval: Duration,
    max_polls: Option<u64>,
    mut emit: F,
) -> Result<(), TdrError>
where
    S: SpecLookup,
    F: FnMut(&str),
{
    let mut last_seen = None;
    let mut polls = 0u64;

    loop {
        if let Some(report) = poll_once(set, &mut last_seen)? {
            emit(&report);
        }

        polls += 1;
        if max_polls.is_some_and(|max| polls >= max) {
            return Ok(());
        }
        std::thread::sleep(interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{DataType, SpecTable, TestSpec};
    use pretty_assertions::assert_eq;
    use std::fs;

    const HEADER: &str = "[TIME] TIMESTAMP / RECORD ID,[CONFIG] UUT SERIAL NUMBER,[RESULT] TEST P/F STATUS,Voltage [MEAS],Voltage\n";
    const FIRST: &str = "2024-01-01_10:00:00.000000,SN1,PASS,5.0,PASS\n";
    const SECOND: &str = "2024-01-01_11:00:00.000000,SN2,FAIL,4.8,FAIL\n";

    fn voltage_spec() -> SpecTable {
        SpecTable::from_specs([(
            "Voltage".to_string(),
            TestSpec {
                data_type: DataType::Dbl,
                nominal: 5.0,
                units: "V".to_string(),
                low_limit: 4.9,
                high_limit: 5.1,
            },
        )])
    }

    #[test]
    fn reports_only_new_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tdr.csv");
        fs::write(&path, HEADER).unwrap();

        let mut set = RecordSet::load(&path, voltage_spec()).unwrap();
        let mut last_seen = None;

        // Empty table: nothing yet, keep polling.
        assert_eq!(poll_once(&mut set, &mut last_seen).unwrap(), None);
        assert_eq!(last_seen, None);

        // First record passes: reported, with an empty failure report.
        fs::write(&path, format!("{HEADER}{FIRST}")).unwrap();
        assert_eq!(
            poll_once(&mut set, &mut last_seen).unwrap(),
            Some(String::new())
        );

        // Unchanged file: no new record.
        assert_eq!(poll_once(&mut set, &mut last_seen).unwrap(), None);

        // Newer failing record appended.
        fs::write(&path, format!("{HEADER}{FIRST}{SECOND}")).unwrap();
        assert_eq!(
            poll_once(&mut set, &mut last_seen).unwrap(),
            Some("|ftestres=0,Voltage,4.8,5.1,4.9,5.0,V,<>\n".to_string())
        );
        assert_eq!(poll_once(&mut set, &mut last_seen).unwrap(), None);
    }

    #[test]
    fn load_errors_abort_the_poll() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tdr.csv");
        fs::write(&path, format!("{HEADER}{FIRST}")).unwrap();

        let mut set = RecordSet::load(&path, voltage_spec()).unwrap();
        let mut last_seen = None;
        fs::write(&path, format!("{HEADER}yesterday,SN3,PASS,5.0,PASS\n")).unwrap();

        assert!(matches!(
            poll_once(&mut set, &mut last_seen),
            Err(TdrError::DateFormat { .. })
        ));
    }

    #[test]
    fn run_stops_after_max_polls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tdr.csv");
        fs::write(&path, format!("{HEADER}{FIRST}{SECOND}")).unwrap();

        let mut set = RecordSet::load(&path, voltage_spec()).unwrap();
        let mut reports = Vec::new();
        run(&mut set, Duration::ZERO, Some(3), |r| reports.push(r.to_string())).unwrap();

        // Three polls of an unchanged file: one report.
        assert_eq!(
            reports,
            vec!["|ftestres=0,Voltage,4.8,5.1,4.9,5.0,V,<>\n".to_string()]
        );
    }

    #[test]
    fn run_propagates_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tdr.csv");
        fs::write(&path, format!("{HEADER}{FIRST}")).unwrap();

        let mut set = RecordSet::load(&path, voltage_spec()).unwrap();
        fs::remove_file(&path).unwrap();

        let result = run(&mut set, Duration::ZERO, None, |_| {});
        assert!(matches!(result, Err(TdrError::Read { .. })));
    }
}
