// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Render effects the reconciler asks the outer loop to perform.
//!
//! The reconciler mutates state and decides policy; executing these —
//! projecting, diffing, fetching logs, driving the render sink — is the
//! run loop's job.

use fv_core::countdown::CountdownKey;
use fv_core::machine::{Machine, MachineId};

/// Effects emitted by the reconciler.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Re-project the whole snapshot through the current filters and
    /// diff against the previous visible set.
    FullRender,
    /// Re-render exactly one machine card in place.
    PatchCard { location: String, machine: MachineId },
    /// Update one countdown display. A missing display target is a
    /// renderer no-op, never an error.
    Countdown { key: CountdownKey, display: String },
    /// The alert feed changed (new alert or expiry).
    AlertsChanged,
    /// Fetch the production log feed again (push-triggered).
    RefreshLogs,
}

impl Effect {
    /// Effect name for log spans.
    pub fn name(&self) -> &'static str {
        match self {
            Effect::FullRender => "full_render",
            Effect::PatchCard { .. } => "patch_card",
            Effect::Countdown { .. } => "countdown",
            Effect::AlertsChanged => "alerts_changed",
            Effect::RefreshLogs => "refresh_logs",
        }
    }
}

/// One step of the structured render diff, keyed by stable machine id.
///
/// Updating an existing card in place (rather than destroy/recreate)
/// preserves the countdown bound to that machine's display element.
#[derive(Debug, Clone, PartialEq)]
pub enum CardOp {
    Create { location: String, machine: Machine },
    Update { location: String, machine: Machine },
    Remove { machine: MachineId },
}

impl CardOp {
    pub fn machine_id(&self) -> &MachineId {
        match self {
            CardOp::Create { machine, .. } | CardOp::Update { machine, .. } => &machine.id,
            CardOp::Remove { machine } => machine,
        }
    }
}
