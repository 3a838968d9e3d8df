// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fleet snapshot: the authoritative server state at a point in time.
//!
//! A snapshot is replaced wholesale on every pull or push, or patched in
//! place (one machine) after a successful optimistic action. Location
//! names are unique within a snapshot; machine ids are unique across the
//! whole fleet. Neither is validated client-side — both hold by
//! construction of server data.

use crate::machine::{Machine, MachineId};
use serde::{Deserialize, Serialize};

/// A named location and the machines installed there, in server order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default)]
    pub machines: Vec<Machine>,
}

/// Ordered sequence of locations — the last-known authoritative fleet state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub locations: Vec<Location>,
}

impl Snapshot {
    /// Find a machine anywhere in the fleet.
    pub fn find_machine(&self, id: &MachineId) -> Option<&Machine> {
        self.locations.iter().flat_map(|l| l.machines.iter()).find(|m| &m.id == id)
    }

    /// Find the location name a machine currently belongs to.
    pub fn location_of(&self, id: &MachineId) -> Option<&str> {
        self.locations
            .iter()
            .find(|l| l.machines.iter().any(|m| &m.id == id))
            .map(|l| l.name.as_str())
    }

    /// Iterate over every machine with its owning location name.
    pub fn machines(&self) -> impl Iterator<Item = (&str, &Machine)> {
        self.locations
            .iter()
            .flat_map(|l| l.machines.iter().map(move |m| (l.name.as_str(), m)))
    }

    /// Ids of every machine in the snapshot.
    pub fn machine_ids(&self) -> impl Iterator<Item = &MachineId> {
        self.locations.iter().flat_map(|l| l.machines.iter()).map(|m| &m.id)
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
