// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use fv_core::machine::{Job, MachineStatus, QueuedJob};
use yare::parameterized;

#[parameterized(
    plain = { "WO-100", "WO-100" },
    comma = { "a,b", "\"a,b\"" },
    quote = { "say \"hi\"", "\"say \"\"hi\"\"\"" },
    newline = { "a\nb", "\"a\nb\"" },
)]
fn csv_fields_are_quoted_when_needed(input: &str, expected: &str) {
    assert_eq!(csv_field(input), expected);
}

#[test]
fn card_line_includes_job_and_next_job() {
    let machine = Machine::builder()
        .id("M1")
        .name("Extruder 1")
        .status(MachineStatus::Running)
        .job(Job::builder().work_order("WO-100").remaining_time(Some(125)).build())
        .next_job(QueuedJob::builder().work_order("WO-200").remaining_time(Some(60)).build())
        .build();
    let line = card_line("Modan", &machine);
    assert!(line.contains("Extruder 1"));
    assert!(line.contains("WO-100"));
    assert!(line.contains("eta 2:05"));
    assert!(line.contains("next: WO-200 in 1:00"));
}

#[test]
fn card_line_without_job_is_just_the_header() {
    let machine = Machine::builder().id("M2").name("Welder 2").build();
    let line = card_line("Modan", &machine);
    assert!(line.contains("Welder 2"));
    assert!(!line.contains("eta"));
}

#[test]
fn log_line_fills_missing_fields_with_dashes() {
    let log = ProductionLog {
        machine_id: "M1".into(),
        work_order: None,
        pipe_size: None,
        produced_qty: 7,
        timestamp: "2026-08-27 10:00".into(),
    };
    assert_eq!(log_line(&log), "2026-08-27 10:00  M1  -  qty 7  -");
}

#[test]
fn csv_export_round_trips_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs.csv");
    let logs = vec![ProductionLog {
        machine_id: "M1".into(),
        work_order: Some("WO-1,a".into()),
        pipe_size: Some("2in".into()),
        produced_qty: 3,
        timestamp: "t0".into(),
    }];
    write_logs_csv(&path, &logs).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "timestamp,machine_id,work_order,pipe_size,produced_qty\nt0,M1,\"WO-1,a\",2in,3\n"
    );
}
