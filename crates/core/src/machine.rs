// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Machine, job, and queued-job model.
//!
//! Shapes mirror what the server sends. Nothing here is validated on
//! receipt — a machine with a malformed or missing `job` is simply a
//! machine with no job, never a parse failure.

use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Unique identifier for a machine, stable across the whole fleet.
///
/// Uniqueness holds regardless of location; a machine changes location
/// only via a full snapshot replace, never via a patch.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MachineId(pub String);

impl MachineId {
    /// Create a new MachineId from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string value of this MachineId.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for MachineId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MachineId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<str> for MachineId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for MachineId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Borrow<str> for MachineId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Operational status of a machine.
///
/// The server's status vocabulary is open-ended; anything unrecognized
/// round-trips through `Unknown` so a new server-side status never breaks
/// deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MachineStatus {
    Idle,
    Running,
    Paused,
    Stopped,
    Unknown(String),
}

impl MachineStatus {
    pub fn as_str(&self) -> &str {
        match self {
            MachineStatus::Idle => "idle",
            MachineStatus::Running => "running",
            MachineStatus::Paused => "paused",
            MachineStatus::Stopped => "stopped",
            MachineStatus::Unknown(s) => s,
        }
    }
}

impl From<String> for MachineStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "idle" => MachineStatus::Idle,
            "running" => MachineStatus::Running,
            "paused" => MachineStatus::Paused,
            "stopped" => MachineStatus::Stopped,
            _ => MachineStatus::Unknown(s),
        }
    }
}

impl From<MachineStatus> for String {
    fn from(s: MachineStatus) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for MachineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The job currently running on a machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub work_order: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub completed_qty: u32,
    /// `completed_qty <= total_qty` is a server invariant; surfaced as-is,
    /// not enforced here.
    #[serde(default)]
    pub total_qty: u32,
    /// Authoritative seconds remaining; the countdown board interpolates
    /// between updates.
    #[serde(default)]
    pub remaining_time: Option<i64>,
    #[serde(default)]
    pub progress_percent: f64,
}

/// A job queued to run next on a machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedJob {
    #[serde(default)]
    pub work_order: String,
    #[serde(default)]
    pub pipe_size: String,
    #[serde(default)]
    pub produced_qty: u32,
    #[serde(default)]
    pub total_qty: u32,
    #[serde(default)]
    pub remaining_time: Option<i64>,
}

/// A production machine as reported by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    pub id: MachineId,
    pub name: String,
    #[serde(default = "default_status")]
    pub status: MachineStatus,
    #[serde(default, deserialize_with = "lenient_opt")]
    pub job: Option<Job>,
    #[serde(default, deserialize_with = "lenient_opt")]
    pub next_job: Option<QueuedJob>,
}

fn default_status() -> MachineStatus {
    MachineStatus::Unknown(String::new())
}

/// Deserialize an optional sub-object, treating a malformed value as absent.
fn lenient_opt<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: for<'a> Deserialize<'a>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

crate::builder! {
    pub struct JobBuilder => Job {
        into {
            work_order: String = "WO-100",
            size: String = "2in",
        }
        set {
            completed_qty: u32 = 0,
            total_qty: u32 = 100,
            remaining_time: Option<i64> = Some(600),
            progress_percent: f64 = 0.0,
        }
    }
}

crate::builder! {
    pub struct QueuedJobBuilder => QueuedJob {
        into {
            work_order: String = "WO-200",
            pipe_size: String = "4in",
        }
        set {
            produced_qty: u32 = 0,
            total_qty: u32 = 50,
            remaining_time: Option<i64> = Some(1200),
        }
    }
}

crate::builder! {
    pub struct MachineBuilder => Machine {
        into {
            id: MachineId = "M1",
            name: String = "Extruder 1",
        }
        set {
            status: MachineStatus = MachineStatus::Idle,
        }
        option {
            job: Job = None,
            next_job: QueuedJob = None,
        }
    }
}

#[cfg(test)]
#[path = "machine_tests.rs"]
mod tests;
