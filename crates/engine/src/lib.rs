// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fv-engine: synchronization and countdown-interpolation engine.
//!
//! Owns the canonical in-memory snapshot, merges push/pull/optimistic
//! updates, keeps per-machine countdowns advancing between authoritative
//! updates, and decides per update whether and how to re-render.

pub mod effect;
pub mod phase;
pub mod projector;
pub mod reconciler;
pub mod state;
pub mod thresholds;

pub use effect::{CardOp, Effect};
pub use phase::{ActionId, ActionPhase};
pub use projector::{diff, project, Filters, VisibleLocation};
pub use reconciler::{ActionOutcome, NewJobNotice, PushUpdate, Reconciler};
pub use state::DashboardState;
pub use thresholds::evaluate;
