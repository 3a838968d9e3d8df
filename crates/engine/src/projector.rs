// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! View projection: (snapshot, session, filters) → the visible subset.
//!
//! Pure and idempotent — projecting the same inputs twice yields the same
//! output, whether the trigger was a push, a pull, or a local patch. The
//! diff step turns two visible sets into keyed create/update/remove card
//! operations so the renderer updates entities in place.

use crate::effect::CardOp;
use fv_core::machine::{Machine, MachineStatus};
use fv_core::session::Session;
use fv_core::snapshot::Snapshot;
use std::collections::BTreeSet;

/// Active dashboard filters. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    pub location: Option<String>,
    pub status: Option<MachineStatus>,
    pub search: Option<String>,
}

impl Filters {
    /// Whether a machine passes the status and search filters.
    pub fn matches(&self, machine: &Machine) -> bool {
        if let Some(status) = &self.status {
            if &machine.status != status {
                return false;
            }
        }
        if let Some(needle) = &self.search {
            let needle = needle.trim().to_lowercase();
            if !needle.is_empty() {
                let name_hit = machine.name.to_lowercase().contains(&needle);
                let wo_hit = machine
                    .job
                    .as_ref()
                    .map(|j| j.work_order.to_lowercase().contains(&needle))
                    .unwrap_or(false);
                if !name_hit && !wo_hit {
                    return false;
                }
            }
        }
        true
    }
}

/// A location as the operator sees it after scoping and filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleLocation {
    pub name: String,
    pub machines: Vec<Machine>,
}

/// Project the visible subset of a snapshot.
///
/// Order of application: role scope, location filter, status filter,
/// free-text search (case-insensitive substring on machine name or the
/// current job's work order). Locations emptied by machine filters stay
/// in the output with no machines, keeping section headings stable.
pub fn project(snapshot: &Snapshot, session: &Session, filters: &Filters) -> Vec<VisibleLocation> {
    snapshot
        .locations
        .iter()
        .filter(|loc| session.scope.allows(&loc.name))
        .filter(|loc| match &filters.location {
            Some(name) => &loc.name == name,
            None => true,
        })
        .map(|loc| VisibleLocation {
            name: loc.name.clone(),
            machines: loc.machines.iter().filter(|m| filters.matches(m)).cloned().collect(),
        })
        .collect()
}

/// Diff two visible sets into card operations keyed by machine id.
///
/// Unchanged machines produce no op; changed ones produce an in-place
/// `Update` (preserving any countdown bound to the card); machines gone
/// from the view produce `Remove`.
pub fn diff(prev: &[VisibleLocation], next: &[VisibleLocation]) -> Vec<CardOp> {
    let mut ops = Vec::new();
    let prev_by_id: std::collections::HashMap<_, _> = prev
        .iter()
        .flat_map(|loc| loc.machines.iter().map(move |m| (&m.id, (loc.name.as_str(), m))))
        .collect();

    let mut seen = BTreeSet::new();
    for loc in next {
        for machine in &loc.machines {
            seen.insert(machine.id.clone());
            match prev_by_id.get(&machine.id) {
                None => ops.push(CardOp::Create {
                    location: loc.name.clone(),
                    machine: machine.clone(),
                }),
                Some((prev_loc, prev_machine)) => {
                    if *prev_loc != loc.name || *prev_machine != machine {
                        ops.push(CardOp::Update {
                            location: loc.name.clone(),
                            machine: machine.clone(),
                        });
                    }
                }
            }
        }
    }

    for loc in prev {
        for machine in &loc.machines {
            if !seen.contains(&machine.id) {
                ops.push(CardOp::Remove { machine: machine.id.clone() });
            }
        }
    }

    ops
}

#[cfg(test)]
#[path = "projector_tests.rs"]
mod tests;
