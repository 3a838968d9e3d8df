// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Suppression state machine for locally initiated actions.
//!
//! When the client issues a state-changing action, the push cycle that
//! immediately follows is assumed to be a stale echo — a message produced
//! before the action committed server-side — and its render is discarded
//! rather than risk visually overwriting the optimistic update. This
//! module makes that "discard next push" policy an explicit transition
//! table instead of a bare boolean.

use std::fmt;
use uuid::Uuid;

/// Identifier for one locally issued action. Purely local — it never
/// crosses the wire, so it has no serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionId(Uuid);

impl ActionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ActionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the client stands relative to its last issued action.
///
/// The slot is single: actions issued while one is already pending
/// collapse into the existing slot, and only the next push is suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionPhase {
    /// No local action outstanding; pushes render normally.
    Idle,
    /// An action is in flight; the next push is suppressed.
    Pending(ActionId),
    /// The action's response has been applied; the next push is still
    /// suppressed (it may predate the action's commit).
    Settled(ActionId),
}

impl Default for ActionPhase {
    fn default() -> Self {
        ActionPhase::Idle
    }
}

impl ActionPhase {
    /// A local action was issued, before its network call goes out.
    pub fn action_issued(&mut self, id: ActionId) {
        *self = match *self {
            ActionPhase::Idle => ActionPhase::Pending(id),
            // Concurrent actions collapse into the one pending slot.
            ActionPhase::Pending(first) => ActionPhase::Pending(first),
            ActionPhase::Settled(_) => ActionPhase::Pending(id),
        };
    }

    /// The in-flight action's response arrived (success or failure).
    /// Suppression stays armed either way — the next push clears it.
    pub fn action_settled(&mut self) {
        if let ActionPhase::Pending(id) = *self {
            *self = ActionPhase::Settled(id);
        }
    }

    /// A push arrived. Returns true when its render must be discarded;
    /// the guard is consumed either way.
    pub fn push_received(&mut self) -> bool {
        match *self {
            ActionPhase::Idle => false,
            ActionPhase::Pending(_) | ActionPhase::Settled(_) => {
                *self = ActionPhase::Idle;
                true
            }
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ActionPhase::Idle)
    }
}

// Display spelled out rather than via simple_display!; the Pending and
// Settled variants carry the action id in the output.
impl fmt::Display for ActionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionPhase::Idle => write!(f, "idle"),
            ActionPhase::Pending(id) => write!(f, "pending({id})"),
            ActionPhase::Settled(id) => write!(f, "settled({id})"),
        }
    }
}

#[cfg(test)]
#[path = "phase_tests.rs"]
mod tests;
