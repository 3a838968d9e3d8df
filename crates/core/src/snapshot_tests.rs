// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::machine::MachineStatus;

fn fleet() -> Snapshot {
    Snapshot {
        locations: vec![
            Location {
                name: "Modan".into(),
                machines: vec![
                    Machine::builder().id("M1").name("Extruder 1").build(),
                    Machine::builder().id("M2").name("Extruder 2").build(),
                ],
            },
            Location {
                name: "Baldeya".into(),
                machines: vec![Machine::builder()
                    .id("B1")
                    .status(MachineStatus::Running)
                    .build()],
            },
        ],
    }
}

#[test]
fn find_machine_searches_all_locations() {
    let snapshot = fleet();
    assert_eq!(snapshot.find_machine(&"B1".into()).unwrap().id, "B1");
    assert!(snapshot.find_machine(&"nope".into()).is_none());
}

#[test]
fn location_of_reports_owning_location() {
    let snapshot = fleet();
    assert_eq!(snapshot.location_of(&"M2".into()), Some("Modan"));
    assert_eq!(snapshot.location_of(&"B1".into()), Some("Baldeya"));
    assert_eq!(snapshot.location_of(&"nope".into()), None);
}

#[test]
fn machines_iterates_in_server_order() {
    let snapshot = fleet();
    let ids: Vec<_> = snapshot.machines().map(|(_, m)| m.id.as_str().to_string()).collect();
    assert_eq!(ids, vec!["M1", "M2", "B1"]);
}

#[test]
fn empty_payload_deserializes_to_empty_snapshot() {
    let snapshot: Snapshot = serde_json::from_str("{}").unwrap();
    assert!(snapshot.locations.is_empty());
}
