// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The one owned context for everything the dashboard mutates.
//!
//! Snapshot store, countdown board, alert feed, and suppression phase are
//! process-wide singletons in spirit, but they live here as plain owned
//! fields — `init` on login, `teardown` on logout — so nothing hides
//! behind global mutation and the whole state tests in isolation. The
//! reconciler is the only writer.

use crate::phase::ActionPhase;
use crate::projector::{Filters, VisibleLocation};
use fv_core::alert::AlertFeed;
use fv_core::countdown::CountdownBoard;
use fv_core::logs::ProductionLog;
use fv_core::session::Session;
use fv_core::store::SnapshotStore;

/// All mutable dashboard state, owned in one place.
#[derive(Default)]
pub struct DashboardState {
    pub(crate) session: Option<Session>,
    pub(crate) store: SnapshotStore,
    pub(crate) board: CountdownBoard,
    pub(crate) alerts: AlertFeed,
    pub(crate) phase: ActionPhase,
    pub(crate) filters: Filters,
    pub(crate) prev_visible: Vec<VisibleLocation>,
    pub(crate) logs: Vec<ProductionLog>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session: everything else resets to empty.
    pub fn init(&mut self, session: Session) {
        *self = Self::default();
        self.session = Some(session);
    }

    /// End the session: cancel every countdown, drop alerts and logs,
    /// reset the suppression phase. The snapshot is dropped too —
    /// countdown state never survives a reload.
    pub fn teardown(&mut self) {
        *self = Self::default();
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn phase(&self) -> ActionPhase {
        self.phase
    }

    pub fn alerts(&self) -> &AlertFeed {
        &self.alerts
    }

    pub fn board(&self) -> &CountdownBoard {
        &self.board
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn logs(&self) -> &[ProductionLog] {
        &self.logs
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
