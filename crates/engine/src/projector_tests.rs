// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use fv_core::machine::Job;
use fv_core::snapshot::Location;

fn fleet() -> Snapshot {
    Snapshot {
        locations: vec![
            Location {
                name: "Modan".into(),
                machines: vec![
                    Machine::builder()
                        .id("M1")
                        .name("Extruder 1")
                        .status(MachineStatus::Running)
                        .job(Job::builder().work_order("WO-100").build())
                        .build(),
                    Machine::builder()
                        .id("M2")
                        .name("Welder 2")
                        .status(MachineStatus::Idle)
                        .build(),
                ],
            },
            Location {
                name: "Baldeya".into(),
                machines: vec![Machine::builder()
                    .id("B1")
                    .name("Extruder 9")
                    .status(MachineStatus::Running)
                    .build()],
            },
            Location {
                name: "Al-Khraj".into(),
                machines: vec![],
            },
        ],
    }
}

#[test]
fn operator_sees_only_their_location() {
    let visible = project(&fleet(), &Session::operator("1111", "Modan"), &Filters::default());
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name, "Modan");
    assert_eq!(visible[0].machines.len(), 2);
}

#[test]
fn admin_sees_all_locations() {
    let visible = project(&fleet(), &Session::admin("Admin"), &Filters::default());
    let names: Vec<_> = visible.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Modan", "Baldeya", "Al-Khraj"]);
}

#[test]
fn location_filter_restricts_admin_view() {
    let filters = Filters { location: Some("Baldeya".into()), ..Filters::default() };
    let visible = project(&fleet(), &Session::admin("Admin"), &filters);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name, "Baldeya");
}

#[test]
fn status_filter_drops_non_matching_machines() {
    let filters = Filters { status: Some(MachineStatus::Running), ..Filters::default() };
    let visible = project(&fleet(), &Session::admin("Admin"), &filters);
    assert_eq!(visible[0].machines.len(), 1);
    assert_eq!(visible[0].machines[0].id, "M1");
    // The location itself stays, just with no machines.
    assert!(visible[2].machines.is_empty());
}

#[test]
fn search_matches_name_case_insensitively() {
    let filters = Filters { search: Some("extruder".into()), ..Filters::default() };
    let visible = project(&fleet(), &Session::admin("Admin"), &filters);
    assert_eq!(visible[0].machines.len(), 1);
    assert_eq!(visible[1].machines[0].id, "B1");
}

#[test]
fn search_matches_work_order() {
    let filters = Filters { search: Some("wo-100".into()), ..Filters::default() };
    let visible = project(&fleet(), &Session::admin("Admin"), &filters);
    assert_eq!(visible[0].machines.len(), 1);
    assert_eq!(visible[0].machines[0].id, "M1");
}

#[test]
fn projection_is_idempotent() {
    let snapshot = fleet();
    let session = Session::admin("Admin");
    let filters = Filters { search: Some("extruder".into()), ..Filters::default() };
    assert_eq!(project(&snapshot, &session, &filters), project(&snapshot, &session, &filters));
}

#[test]
fn diff_of_identical_views_is_empty() {
    let visible = project(&fleet(), &Session::admin("Admin"), &Filters::default());
    assert!(diff(&visible, &visible).is_empty());
}

#[test]
fn diff_emits_create_for_new_machines() {
    let next = project(&fleet(), &Session::admin("Admin"), &Filters::default());
    let ops = diff(&[], &next);
    assert_eq!(ops.len(), 3);
    assert!(ops.iter().all(|op| matches!(op, CardOp::Create { .. })));
}

#[test]
fn diff_emits_update_in_place_for_changed_machines() {
    let prev = project(&fleet(), &Session::admin("Admin"), &Filters::default());
    let mut changed = fleet();
    changed.locations[0].machines[0].status = MachineStatus::Paused;
    let next = project(&changed, &Session::admin("Admin"), &Filters::default());

    let ops = diff(&prev, &next);
    assert_eq!(ops.len(), 1);
    match &ops[0] {
        CardOp::Update { location, machine } => {
            assert_eq!(location, "Modan");
            assert_eq!(machine.id, "M1");
        }
        other => panic!("expected update, got {other:?}"),
    }
}

#[test]
fn diff_emits_remove_for_vanished_machines() {
    let prev = project(&fleet(), &Session::admin("Admin"), &Filters::default());
    let mut shrunk = fleet();
    shrunk.locations[0].machines.remove(1);
    let next = project(&shrunk, &Session::admin("Admin"), &Filters::default());

    let ops = diff(&prev, &next);
    assert_eq!(ops, vec![CardOp::Remove { machine: "M2".into() }]);
}

#[test]
fn diff_treats_location_move_as_update() {
    let prev = vec![VisibleLocation {
        name: "Modan".into(),
        machines: vec![Machine::builder().id("M1").build()],
    }];
    let next = vec![VisibleLocation {
        name: "Baldeya".into(),
        machines: vec![Machine::builder().id("M1").build()],
    }];
    let ops = diff(&prev, &next);
    assert_eq!(ops.len(), 1);
    assert!(matches!(&ops[0], CardOp::Update { location, .. } if location == "Baldeya"));
}
