// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Last-known authoritative snapshot, with whole-replace and
//! single-machine patch operations.
//!
//! The reconciler is the only writer. Readers get clones; the held
//! snapshot is never handed out by reference for mutation.

use crate::machine::{Machine, MachineId};
use crate::snapshot::Snapshot;

/// Holds the last-known authoritative fleet snapshot.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: Snapshot,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unconditional overwrite — the pull and push paths.
    pub fn replace(&mut self, snapshot: Snapshot) {
        self.current = snapshot;
    }

    /// Replace one machine within its location, leaving every other
    /// machine and location untouched. Used only for optimistic action
    /// results. Returns false (and drops the patch) when the location or
    /// machine is unknown — a late action response may land after the
    /// machine left the fleet.
    pub fn patch_machine(&mut self, location: &str, machine: Machine) -> bool {
        let Some(loc) = self.current.locations.iter_mut().find(|l| l.name == location) else {
            tracing::debug!(location, machine = %machine.id, "patch dropped: unknown location");
            return false;
        };
        match loc.machines.iter_mut().find(|m| m.id == machine.id) {
            Some(slot) => {
                *slot = machine;
                true
            }
            None => {
                tracing::debug!(location, machine = %machine.id, "patch dropped: unknown machine");
                false
            }
        }
    }

    /// Apply an admin rename to the local view. The rename endpoint
    /// returns no machine body, so only the name changes.
    pub fn rename_machine(&mut self, location: &str, id: &MachineId, new_name: &str) -> bool {
        let Some(loc) = self.current.locations.iter_mut().find(|l| l.name == location) else {
            return false;
        };
        match loc.machines.iter_mut().find(|m| &m.id == id) {
            Some(machine) => {
                machine.name = new_name.to_string();
                true
            }
            None => false,
        }
    }

    /// Clone of the current snapshot for projection.
    pub fn read(&self) -> Snapshot {
        self.current.clone()
    }

    /// Borrow the current snapshot for derived computations that do not
    /// outlive the store access.
    pub fn current(&self) -> &Snapshot {
        &self.current
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
