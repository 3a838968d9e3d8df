// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Update reconciliation: three entry points, one shared exit path.
//!
//! Pushes, pulls, and optimistic action results all end in a store
//! mutation followed by a derived refresh; what differs is the merge and
//! render policy. The reconciler is the only writer to the snapshot
//! store, and the countdown board is mutated only through it.

use crate::effect::{CardOp, Effect};
use crate::phase::ActionId;
use crate::projector::{diff, project, Filters};
use crate::state::DashboardState;
use crate::thresholds;
use fv_core::alert::{Alert, Severity};
use fv_core::clock::Clock;
use fv_core::countdown::CountdownKey;
use fv_core::logs::ProductionLog;
use fv_core::machine::{Job, Machine, MachineId};
use fv_core::session::Session;
use fv_core::snapshot::Snapshot;
use fv_core::time_fmt::format_countdown;
use serde::{Deserialize, Serialize};

/// Out-of-band new-job announcement carried on a push message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewJobNotice {
    pub machine_id: MachineId,
    #[serde(default)]
    pub work_order: String,
    #[serde(default)]
    pub qty: u32,
    #[serde(default)]
    pub pipe_size: String,
    #[serde(default)]
    pub eta: Option<i64>,
}

/// One authoritative push from the persistent channel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PushUpdate {
    pub snapshot: Snapshot,
    pub new_job: Option<NewJobNotice>,
}

/// How a locally issued action came back.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// Start/pause/stop succeeded and returned the updated machine.
    Applied { location: String, machine: Machine },
    /// Rename succeeded (`{ok:true}`, no machine body).
    Renamed { location: String, machine: MachineId, new_name: String },
    /// `ok:false` or a transport error. The store stays unpatched and
    /// suppression stays armed for the next push.
    Failed { action: String },
}

/// Merges push/pull/optimistic updates into the dashboard state and
/// decides what to re-render.
pub struct Reconciler<C: Clock> {
    state: DashboardState,
    clock: C,
}

impl<C: Clock> Reconciler<C> {
    pub fn new(clock: C) -> Self {
        Self { state: DashboardState::new(), clock }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Start a session (login).
    pub fn init(&mut self, session: Session) {
        self.state.init(session);
    }

    /// End the session (logout): cancels all countdowns, drops alerts.
    pub fn teardown(&mut self) {
        self.state.teardown();
    }

    /// A full snapshot arrived on the persistent channel.
    ///
    /// If a local action armed suppression, this push is assumed to be a
    /// stale echo: the snapshot is still cached for later reads, but no
    /// derived refresh happens and no render is requested — including the
    /// `new_job` announcement, which reappears with the next push.
    pub fn on_push(&mut self, update: PushUpdate) -> Vec<Effect> {
        if self.state.phase.push_received() {
            tracing::debug!("push suppressed after local action");
            self.state.store.replace(update.snapshot);
            return Vec::new();
        }

        self.state.store.replace(update.snapshot);
        let mut effects = Vec::new();
        if let Some(notice) = update.new_job {
            effects.extend(self.apply_new_job(notice));
        }
        effects.extend(self.full_refresh());
        effects.push(Effect::RefreshLogs);
        effects
    }

    /// A full snapshot arrived from an explicit or periodic pull.
    /// Pulls never consult or clear the suppression phase.
    pub fn on_pull(&mut self, snapshot: Snapshot) -> Vec<Effect> {
        self.state.store.replace(snapshot);
        self.full_refresh()
    }

    /// A local action is about to be issued; arm suppression before the
    /// network call goes out.
    pub fn on_action_issued(&mut self) -> ActionId {
        let id = ActionId::new();
        self.state.phase.action_issued(id);
        tracing::debug!(action = %id, phase = %self.state.phase, "action issued");
        id
    }

    /// A local action's response arrived.
    pub fn on_action_settled(&mut self, outcome: ActionOutcome) -> Vec<Effect> {
        self.state.phase.action_settled();
        match outcome {
            ActionOutcome::Applied { location, machine } => {
                let id = machine.id.clone();
                if !self.state.store.patch_machine(&location, machine.clone()) {
                    // Late response for a machine that left the fleet.
                    return Vec::new();
                }
                self.rearm_machine(&machine);
                vec![Effect::PatchCard { location, machine: id }]
            }
            ActionOutcome::Renamed { location, machine, new_name } => {
                if !self.state.store.rename_machine(&location, &machine, &new_name) {
                    return Vec::new();
                }
                self.push_alert(format!("Machine renamed to {new_name}"), Severity::Info);
                vec![Effect::PatchCard { location, machine }, Effect::AlertsChanged]
            }
            ActionOutcome::Failed { action } => {
                self.push_alert(format!("{action} failed"), Severity::Danger);
                vec![Effect::AlertsChanged]
            }
        }
    }

    /// One second elapsed on the shared clock: advance every armed
    /// countdown and expire old alerts.
    pub fn on_tick(&mut self) -> Vec<Effect> {
        let mut effects: Vec<Effect> = self
            .state
            .board
            .tick()
            .into_iter()
            .map(|(key, secs)| Effect::Countdown { key, display: format_countdown(Some(secs)) })
            .collect();
        if self.state.alerts.expire(self.clock.epoch_ms()) {
            effects.push(Effect::AlertsChanged);
        }
        effects
    }

    /// Replace the active filters and re-project.
    pub fn set_filters(&mut self, filters: Filters) -> Vec<Effect> {
        self.state.filters = filters;
        vec![Effect::FullRender]
    }

    /// Record an out-of-band alert (connection status, fetch failures).
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) -> Vec<Effect> {
        self.push_alert(message.into(), severity);
        vec![Effect::AlertsChanged]
    }

    /// Store the latest production log feed.
    pub fn set_logs(&mut self, logs: Vec<ProductionLog>) {
        self.state.logs = logs;
    }

    /// Execute a `FullRender`: project through the current filters, diff
    /// against the previous visible set, remember the new one.
    ///
    /// Projection is identical whether the trigger was a push, a pull, or
    /// a filter change; without a session nothing is visible.
    pub fn render_cards(&mut self) -> Vec<CardOp> {
        let Some(session) = self.state.session.clone() else {
            return Vec::new();
        };
        let visible = project(self.state.store.current(), &session, &self.state.filters);
        let ops = diff(&self.state.prev_visible, &visible);
        self.state.prev_visible = visible;
        ops
    }

    /// Execute a `PatchCard`: one card op for the affected machine,
    /// keeping the remembered visible set consistent so the next full
    /// diff does not re-emit it.
    pub fn render_card(&mut self, location: &str, id: &MachineId) -> Option<CardOp> {
        let machine = self.state.store.current().find_machine(id)?.clone();

        for loc in &mut self.state.prev_visible {
            if let Some(slot) = loc.machines.iter_mut().find(|m| &m.id == id) {
                if *slot == machine {
                    return None;
                }
                *slot = machine.clone();
                let location = loc.name.clone();
                return Some(CardOp::Update { location, machine });
            }
        }

        // Not currently visible: create the card only if the projection
        // would include it.
        let session = self.state.session.as_ref()?;
        if !session.scope.allows(location) || !self.state.filters.matches(&machine) {
            return None;
        }
        match self.state.prev_visible.iter_mut().find(|l| l.name == location) {
            Some(loc) => loc.machines.push(machine.clone()),
            None => self.state.prev_visible.push(crate::projector::VisibleLocation {
                name: location.to_string(),
                machines: vec![machine.clone()],
            }),
        }
        Some(CardOp::Create { location: location.to_string(), machine })
    }

    fn push_alert(&mut self, message: String, severity: Severity) {
        self.state.alerts.push(Alert::new(message, severity, &self.clock));
    }

    /// Shared derived refresh for authoritative replaces: re-arm
    /// countdowns for every machine with a job or next job, cancel
    /// countdowns of vanished machines, and run the threshold scan.
    fn full_refresh(&mut self) -> Vec<Effect> {
        let snapshot = self.state.store.read();
        self.rearm_all(&snapshot);

        let alerts = thresholds::evaluate(&snapshot, &self.clock);
        let fired = !alerts.is_empty();
        for alert in alerts {
            self.state.alerts.push(alert);
        }

        let mut effects = vec![Effect::FullRender];
        if fired {
            effects.push(Effect::AlertsChanged);
        }
        effects
    }

    fn rearm_all(&mut self, snapshot: &Snapshot) {
        // Drop countdowns whose machine left the snapshot.
        let gone: Vec<MachineId> = self
            .state
            .board
            .keys()
            .map(|k| k.machine.clone())
            .filter(|id| snapshot.find_machine(id).is_none())
            .collect();
        for id in gone {
            self.state.board.cancel_machine(&id);
        }

        for (_, machine) in snapshot.machines() {
            self.rearm_machine(machine);
        }
    }

    /// Hard-reset one machine's countdowns from its authoritative times.
    fn rearm_machine(&mut self, machine: &Machine) {
        let job_key = CountdownKey::job(machine.id.clone());
        match machine.job.as_ref().and_then(|j| j.remaining_time) {
            Some(secs) => self.state.board.arm(job_key, secs),
            None => self.state.board.cancel(&job_key),
        }
        let next_key = CountdownKey::next_job(machine.id.clone());
        match machine.next_job.as_ref().and_then(|j| j.remaining_time) {
            Some(secs) => self.state.board.arm(next_key, secs),
            None => self.state.board.cancel(&next_key),
        }
    }

    /// Apply an out-of-band new-job announcement: one warning alert plus
    /// a direct job patch on the announced machine.
    fn apply_new_job(&mut self, notice: NewJobNotice) -> Vec<Effect> {
        let Some(found) = self.state.store.current().find_machine(&notice.machine_id) else {
            tracing::debug!(machine = %notice.machine_id, "new_job for unknown machine dropped");
            return Vec::new();
        };
        let mut machine = found.clone();
        let Some(location) = self.state.store.current().location_of(&notice.machine_id) else {
            return Vec::new();
        };
        let location = location.to_string();

        self.push_alert(
            format!("New job assigned to {}: {}", machine.name, notice.work_order),
            Severity::Warning,
        );

        machine.job = Some(Job {
            work_order: notice.work_order,
            size: notice.pipe_size,
            completed_qty: 0,
            total_qty: notice.qty,
            remaining_time: notice.eta,
            progress_percent: 0.0,
        });
        self.state.store.patch_machine(&location, machine.clone());
        self.rearm_machine(&machine);

        vec![Effect::AlertsChanged]
    }
}

#[cfg(test)]
#[path = "reconciler_tests.rs"]
mod tests;
