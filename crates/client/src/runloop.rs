// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The client event loop.
//!
//! One task owns the reconciler and the render sink. Everything funnels
//! through a single `select!`: UI commands, channel events, the shared
//! 1 Hz tick, and completions of spawned API calls. Suppression is armed
//! on this task before any action request leaves, so a push racing the
//! action response can never render ahead of it.

use crate::api::{pull_with_retry, ApiError, DashboardApi};
use crate::channel::ChannelEvent;
use crate::protocol::MachineAction;
use crate::render::RenderSink;
use fv_core::alert::Severity;
use fv_core::clock::SystemClock;
use fv_core::logs::{recent_logs, ProductionLog};
use fv_core::machine::MachineId;
use fv_core::session::Session;
use fv_core::snapshot::Snapshot;
use fv_engine::effect::Effect;
use fv_engine::projector::Filters;
use fv_engine::reconciler::{ActionOutcome, Reconciler};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

const TICK: Duration = Duration::from_secs(1);
const COMMAND_BUFFER: usize = 32;

/// What the UI layer can ask of the loop.
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    /// Start/pause/stop one machine.
    Action { action: MachineAction, location: String, machine_id: MachineId },
    /// Rename one machine (admin).
    Rename { location: String, machine_id: MachineId, new_name: String },
    /// Replace the active view filters.
    SetFilters(Filters),
    /// Force a snapshot pull.
    Refresh,
}

/// Completions of work the loop spawned.
enum LoopMsg {
    Settled(ActionOutcome),
    Logs(Result<Vec<ProductionLog>, ApiError>),
    Pulled(Result<Snapshot, ApiError>),
}

/// Handle to a running loop.
pub struct LoopHandle {
    commands: mpsc::Sender<UiCommand>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl LoopHandle {
    /// Returns false when the loop has shut down.
    pub async fn send(&self, command: UiCommand) -> bool {
        self.commands.send(command).await.is_ok()
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Stop the loop and wait for it to drain.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.task.await;
    }
}

/// Spawn the event loop for a logged-in session.
///
/// The caller owns the push channel (see [`crate::channel::spawn_channel`])
/// and hands over its receiving end; `cancel` stops the loop.
pub fn run<S>(
    api: Arc<dyn DashboardApi>,
    channel: mpsc::Receiver<ChannelEvent>,
    session: Session,
    sink: S,
    cancel: CancellationToken,
) -> LoopHandle
where
    S: RenderSink + 'static,
{
    let (commands_tx, commands_rx) = mpsc::channel(COMMAND_BUFFER);
    let mut reconciler = Reconciler::new(SystemClock);
    reconciler.init(session);

    let looped = EventLoop { api, sink, reconciler };
    let task = tokio::spawn(looped.run(commands_rx, channel, cancel.clone()));
    LoopHandle { commands: commands_tx, cancel, task }
}

struct EventLoop<S: RenderSink> {
    api: Arc<dyn DashboardApi>,
    sink: S,
    reconciler: Reconciler<SystemClock>,
}

impl<S: RenderSink> EventLoop<S> {
    async fn run(
        mut self,
        mut commands: mpsc::Receiver<UiCommand>,
        mut channel: mpsc::Receiver<ChannelEvent>,
        cancel: CancellationToken,
    ) {
        let (internal_tx, mut internal_rx) = mpsc::channel(COMMAND_BUFFER);
        self.spawn_pull(&internal_tx);
        self.spawn_logs_fetch(&internal_tx);

        // First tick lands a full second in, not immediately.
        let mut ticker =
            tokio::time::interval_at(tokio::time::Instant::now() + TICK, TICK);

        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let effects = self.reconciler.on_tick();
                    self.apply(effects, &internal_tx);
                }
                Some(command) = commands.recv() => {
                    self.on_command(command, &internal_tx);
                }
                Some(event) = channel.recv() => {
                    self.on_channel_event(event, &internal_tx);
                }
                Some(msg) = internal_rx.recv() => {
                    self.on_loop_msg(msg, &internal_tx);
                }
            }
        }
        self.reconciler.teardown();
    }

    fn on_command(&mut self, command: UiCommand, internal: &mpsc::Sender<LoopMsg>) {
        match command {
            UiCommand::Action { action, location, machine_id } => {
                self.reconciler.on_action_issued();
                let api = Arc::clone(&self.api);
                let tx = internal.clone();
                tokio::spawn(async move {
                    let outcome =
                        match api.machine_action(action, &location, &machine_id).await {
                            Ok(reply) if reply.ok => match reply.machine {
                                Some(machine) => ActionOutcome::Applied { location, machine },
                                None => ActionOutcome::Failed { action: action.to_string() },
                            },
                            Ok(_) => ActionOutcome::Failed { action: action.to_string() },
                            Err(error) => {
                                tracing::warn!(%action, %error, "machine action failed");
                                ActionOutcome::Failed { action: action.to_string() }
                            }
                        };
                    let _ = tx.send(LoopMsg::Settled(outcome)).await;
                });
            }
            UiCommand::Rename { location, machine_id, new_name } => {
                self.reconciler.on_action_issued();
                let api = Arc::clone(&self.api);
                let tx = internal.clone();
                tokio::spawn(async move {
                    let outcome =
                        match api.rename_machine(&location, &machine_id, &new_name).await {
                            Ok(true) => ActionOutcome::Renamed {
                                location,
                                machine: machine_id,
                                new_name,
                            },
                            Ok(false) => ActionOutcome::Failed { action: "rename".into() },
                            Err(error) => {
                                tracing::warn!(%error, "rename failed");
                                ActionOutcome::Failed { action: "rename".into() }
                            }
                        };
                    let _ = tx.send(LoopMsg::Settled(outcome)).await;
                });
            }
            UiCommand::SetFilters(filters) => {
                let effects = self.reconciler.set_filters(filters);
                self.apply(effects, internal);
            }
            UiCommand::Refresh => self.spawn_pull(internal),
        }
    }

    fn on_channel_event(&mut self, event: ChannelEvent, internal: &mpsc::Sender<LoopMsg>) {
        let effects = match event {
            ChannelEvent::Connected => {
                self.reconciler.notify("Live updates connected", Severity::Info)
            }
            ChannelEvent::Push(update) => self.reconciler.on_push(update),
            ChannelEvent::ParseError(_) => {
                self.reconciler.notify("Malformed update dropped", Severity::Warning)
            }
            ChannelEvent::Disconnected => self
                .reconciler
                .notify("Live updates disconnected, retrying", Severity::Warning),
        };
        self.apply(effects, internal);
    }

    fn on_loop_msg(&mut self, msg: LoopMsg, internal: &mpsc::Sender<LoopMsg>) {
        match msg {
            LoopMsg::Settled(outcome) => {
                let effects = self.reconciler.on_action_settled(outcome);
                self.apply(effects, internal);
            }
            LoopMsg::Logs(Ok(logs)) => {
                self.reconciler.set_logs(logs);
                self.sink.logs(recent_logs(self.reconciler.state().logs()));
            }
            LoopMsg::Logs(Err(error)) => {
                tracing::warn!(%error, "production log fetch failed");
            }
            LoopMsg::Pulled(Ok(snapshot)) => {
                let effects = self.reconciler.on_pull(snapshot);
                self.apply(effects, internal);
            }
            LoopMsg::Pulled(Err(error)) => {
                tracing::warn!(%error, "snapshot pull failed");
                let effects = self
                    .reconciler
                    .notify("Dashboard refresh failed", Severity::Danger);
                self.apply(effects, internal);
            }
        }
    }

    fn apply(&mut self, effects: Vec<Effect>, internal: &mpsc::Sender<LoopMsg>) {
        for effect in effects {
            tracing::trace!(effect = effect.name(), "applying effect");
            match effect {
                Effect::FullRender => {
                    let ops = self.reconciler.render_cards();
                    self.sink.apply_cards(&ops);
                }
                Effect::PatchCard { location, machine } => {
                    if let Some(op) = self.reconciler.render_card(&location, &machine) {
                        self.sink.apply_cards(&[op]);
                    }
                }
                Effect::Countdown { key, display } => self.sink.countdown(&key, &display),
                Effect::AlertsChanged => {
                    self.sink.alerts(self.reconciler.state().alerts().alerts());
                }
                Effect::RefreshLogs => self.spawn_logs_fetch(internal),
            }
        }
    }

    fn spawn_pull(&self, internal: &mpsc::Sender<LoopMsg>) {
        let api = Arc::clone(&self.api);
        let tx = internal.clone();
        tokio::spawn(async move {
            let result = pull_with_retry(api.as_ref()).await;
            let _ = tx.send(LoopMsg::Pulled(result)).await;
        });
    }

    fn spawn_logs_fetch(&self, internal: &mpsc::Sender<LoopMsg>) {
        let api = Arc::clone(&self.api);
        let tx = internal.clone();
        tokio::spawn(async move {
            let result = api.production_logs().await;
            let _ = tx.send(LoopMsg::Logs(result)).await;
        });
    }
}

#[cfg(test)]
#[path = "runloop_tests.rs"]
mod tests;
