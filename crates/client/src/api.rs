// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request/response side of the transport boundary.
//!
//! Every call opens a fresh connection, sends one framed request, and
//! reads one framed reply. Callers treat failures as non-fatal: the view
//! goes stale and a retry or the next push heals it.

use crate::protocol::{
    self, AckReply, ActionReply, LogsReply, MachineAction, ProtocolError, Request,
};
use async_trait::async_trait;
use fv_core::logs::ProductionLog;
use fv_core::machine::MachineId;
use fv_core::snapshot::Snapshot;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpStream;

/// Delay before the single retry of a failed snapshot pull.
pub const PULL_RETRY_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("connect to {addr} failed: {source}")]
    Connect { addr: String, source: std::io::Error },
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error("server rejected the request")]
    Rejected,
}

/// The dashboard server's request/response surface.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// Pull the full snapshot.
    async fn dashboard(&self) -> Result<Snapshot, ApiError>;

    /// Fetch the recent production log feed.
    async fn production_logs(&self) -> Result<Vec<ProductionLog>, ApiError>;

    /// Issue a start/pause/stop against one machine.
    async fn machine_action(
        &self,
        action: MachineAction,
        location: &str,
        machine_id: &MachineId,
    ) -> Result<ActionReply, ApiError>;

    /// Rename a machine. Returns the server's `ok`.
    async fn rename_machine(
        &self,
        location: &str,
        machine_id: &MachineId,
        new_name: &str,
    ) -> Result<bool, ApiError>;
}

/// Framed-JSON client over TCP, one connection per request.
pub struct WireApi {
    addr: String,
}

impl WireApi {
    pub fn new(addr: impl Into<String>) -> Self {
        Self { addr: addr.into() }
    }

    async fn roundtrip<T: serde::de::DeserializeOwned>(
        &self,
        request: &Request,
    ) -> Result<T, ApiError> {
        let mut stream = TcpStream::connect(&self.addr).await.map_err(|source| {
            ApiError::Connect { addr: self.addr.clone(), source }
        })?;
        protocol::write_message(&mut stream, request).await?;
        Ok(protocol::read_message(&mut stream).await?)
    }
}

#[async_trait]
impl DashboardApi for WireApi {
    async fn dashboard(&self) -> Result<Snapshot, ApiError> {
        self.roundtrip(&Request::Dashboard).await
    }

    async fn production_logs(&self) -> Result<Vec<ProductionLog>, ApiError> {
        let reply: LogsReply = self.roundtrip(&Request::ProductionLogs).await?;
        Ok(reply.logs)
    }

    async fn machine_action(
        &self,
        action: MachineAction,
        location: &str,
        machine_id: &MachineId,
    ) -> Result<ActionReply, ApiError> {
        self.roundtrip(&Request::MachineAction {
            action,
            location: location.to_string(),
            machine_id: machine_id.clone(),
        })
        .await
    }

    async fn rename_machine(
        &self,
        location: &str,
        machine_id: &MachineId,
        new_name: &str,
    ) -> Result<bool, ApiError> {
        let reply: AckReply = self
            .roundtrip(&Request::RenameMachine {
                location: location.to_string(),
                machine_id: machine_id.clone(),
                new_name: new_name.to_string(),
            })
            .await?;
        Ok(reply.ok)
    }
}

/// Pull the snapshot, retrying exactly once after a short delay. A second
/// failure is returned to the caller; the push channel remains the
/// long-term recovery path.
pub async fn pull_with_retry(api: &dyn DashboardApi) -> Result<Snapshot, ApiError> {
    match api.dashboard().await {
        Ok(snapshot) => Ok(snapshot),
        Err(first) => {
            tracing::warn!(error = %first, "snapshot pull failed, retrying once");
            tokio::time::sleep(PULL_RETRY_DELAY).await;
            api.dashboard().await
        }
    }
}

/// Scripted API for tests: queued replies, recorded requests.
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeApi;

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct Inner {
        snapshots: VecDeque<Result<Snapshot, ApiError>>,
        logs: VecDeque<Result<Vec<ProductionLog>, ApiError>>,
        actions: VecDeque<Result<ActionReply, ApiError>>,
        renames: VecDeque<Result<bool, ApiError>>,
        requests: Vec<Request>,
    }

    #[derive(Default)]
    pub struct FakeApi {
        inner: Mutex<Inner>,
    }

    impl FakeApi {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn queue_snapshot(&self, reply: Result<Snapshot, ApiError>) {
            self.inner.lock().snapshots.push_back(reply);
        }

        pub fn queue_logs(&self, reply: Result<Vec<ProductionLog>, ApiError>) {
            self.inner.lock().logs.push_back(reply);
        }

        pub fn queue_action(&self, reply: Result<ActionReply, ApiError>) {
            self.inner.lock().actions.push_back(reply);
        }

        pub fn queue_rename(&self, reply: Result<bool, ApiError>) {
            self.inner.lock().renames.push_back(reply);
        }

        /// Every request seen so far, in order.
        pub fn requests(&self) -> Vec<Request> {
            self.inner.lock().requests.clone()
        }
    }

    fn next<T>(queue: &mut VecDeque<Result<T, ApiError>>) -> Result<T, ApiError> {
        queue.pop_front().unwrap_or(Err(ApiError::Rejected))
    }

    #[async_trait]
    impl DashboardApi for FakeApi {
        async fn dashboard(&self) -> Result<Snapshot, ApiError> {
            let mut inner = self.inner.lock();
            inner.requests.push(Request::Dashboard);
            next(&mut inner.snapshots)
        }

        async fn production_logs(&self) -> Result<Vec<ProductionLog>, ApiError> {
            let mut inner = self.inner.lock();
            inner.requests.push(Request::ProductionLogs);
            next(&mut inner.logs)
        }

        async fn machine_action(
            &self,
            action: MachineAction,
            location: &str,
            machine_id: &MachineId,
        ) -> Result<ActionReply, ApiError> {
            let mut inner = self.inner.lock();
            inner.requests.push(Request::MachineAction {
                action,
                location: location.to_string(),
                machine_id: machine_id.clone(),
            });
            next(&mut inner.actions)
        }

        async fn rename_machine(
            &self,
            location: &str,
            machine_id: &MachineId,
            new_name: &str,
        ) -> Result<bool, ApiError> {
            let mut inner = self.inner.lock();
            inner.requests.push(Request::RenameMachine {
                location: location.to_string(),
                machine_id: machine_id.clone(),
                new_name: new_name.to_string(),
            });
            next(&mut inner.renames)
        }
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
