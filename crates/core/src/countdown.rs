// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Countdown board: every armed per-machine countdown, advanced by one
//! shared 1 Hz tick.
//!
//! Each countdown is keyed by `(machine, kind)` and holds a mutable
//! seconds-remaining value. Arming is a hard reset — the authoritative
//! `remaining_time` wins over any locally elapsed ticks, so drift never
//! accumulates. Values free-run below zero; `format_countdown` clamps at
//! display time. The board is the only owner of countdown state.

use crate::machine::MachineId;
use std::collections::BTreeMap;

/// Which of a machine's two countdowns a key refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CountdownKind {
    /// The current job's remaining time.
    Job,
    /// The queued next job's ETA.
    NextJob,
}

crate::simple_display! {
    CountdownKind {
        Job => "job",
        NextJob => "next-job",
    }
}

/// Key for one countdown: a machine and which of its timers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CountdownKey {
    pub machine: MachineId,
    pub kind: CountdownKind,
}

impl CountdownKey {
    pub fn job(machine: impl Into<MachineId>) -> Self {
        Self { machine: machine.into(), kind: CountdownKind::Job }
    }

    pub fn next_job(machine: impl Into<MachineId>) -> Self {
        Self { machine: machine.into(), kind: CountdownKind::NextJob }
    }
}

/// All armed countdowns, advanced together by [`CountdownBoard::tick`].
#[derive(Debug, Default)]
pub struct CountdownBoard {
    armed: BTreeMap<CountdownKey, i64>,
}

impl CountdownBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or hard-reset) the countdown for a key at `secs`.
    pub fn arm(&mut self, key: CountdownKey, secs: i64) {
        self.armed.insert(key, secs);
    }

    /// Cancel one countdown. Unarmed keys are a no-op.
    pub fn cancel(&mut self, key: &CountdownKey) {
        self.armed.remove(key);
    }

    /// Cancel both countdowns of a machine (it left the snapshot).
    pub fn cancel_machine(&mut self, machine: &MachineId) {
        self.armed.retain(|key, _| &key.machine != machine);
    }

    /// Cancel everything (logout / teardown).
    pub fn clear(&mut self) {
        self.armed.clear();
    }

    /// Advance every armed countdown by one second and return the new
    /// values in key order. No zero clamp — a countdown whose display
    /// target is gone keeps decrementing headless until canceled.
    pub fn tick(&mut self) -> Vec<(CountdownKey, i64)> {
        self.armed
            .iter_mut()
            .map(|(key, secs)| {
                *secs -= 1;
                (key.clone(), *secs)
            })
            .collect()
    }

    /// Armed keys in key order.
    pub fn keys(&self) -> impl Iterator<Item = &CountdownKey> {
        self.armed.keys()
    }

    /// Current value for a key, if armed.
    pub fn remaining(&self, key: &CountdownKey) -> Option<i64> {
        self.armed.get(key).copied()
    }

    pub fn is_armed(&self, key: &CountdownKey) -> bool {
        self.armed.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.armed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }
}

#[cfg(test)]
#[path = "countdown_tests.rs"]
mod tests;
