// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use fv_core::machine::MachineStatus;
use yare::parameterized;

#[parameterized(
    quit = { "quit" },
    short = { "q" },
    exit = { "exit" },
)]
fn quit_forms(line: &str) {
    assert_eq!(parse_line(line).unwrap(), WatchCommand::Quit);
}

#[test]
fn empty_line_is_a_no_op() {
    assert_eq!(parse_line("   ").unwrap(), WatchCommand::Nothing);
}

#[test]
fn start_parses_into_an_action() {
    let parsed = parse_line("start Modan M1").unwrap();
    assert_eq!(
        parsed,
        WatchCommand::Ui(UiCommand::Action {
            action: MachineAction::Start,
            location: "Modan".into(),
            machine_id: "M1".into(),
        })
    );
}

#[test]
fn start_without_both_args_reports_usage() {
    let err = parse_line("start Modan").unwrap_err();
    assert!(err.contains("usage: start"));
}

#[test]
fn rename_takes_the_rest_of_the_line_as_the_name() {
    let parsed = parse_line("rename Modan M2 Welder 2B").unwrap();
    assert_eq!(
        parsed,
        WatchCommand::Ui(UiCommand::Rename {
            location: "Modan".into(),
            machine_id: "M2".into(),
            new_name: "Welder 2B".into(),
        })
    );
}

#[test]
fn filter_builds_each_named_part() {
    let parsed = parse_line("filter location=Modan status=running search=extruder").unwrap();
    let WatchCommand::Ui(UiCommand::SetFilters(filters)) = parsed else {
        panic!("expected a filter command");
    };
    assert_eq!(filters.location.as_deref(), Some("Modan"));
    assert_eq!(filters.status, Some(MachineStatus::Running));
    assert_eq!(filters.search.as_deref(), Some("extruder"));
}

#[test]
fn filter_clear_resets_everything() {
    let parsed = parse_line("filter clear").unwrap();
    assert_eq!(parsed, WatchCommand::Ui(UiCommand::SetFilters(Filters::default())));
}

#[test]
fn unknown_verbs_are_rejected() {
    assert!(parse_line("launch Modan M1").is_err());
    assert!(parse_line("filter bogus").is_err());
}
