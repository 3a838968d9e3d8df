// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Production log entries pulled from the server.

use serde::{Deserialize, Serialize};

/// How many log entries the dashboard displays.
pub const RECENT_LOG_LIMIT: usize = 20;

/// One produced-quantity record from the production log feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionLog {
    pub machine_id: String,
    #[serde(default)]
    pub work_order: Option<String>,
    #[serde(default)]
    pub pipe_size: Option<String>,
    #[serde(default)]
    pub produced_qty: u32,
    #[serde(default)]
    pub timestamp: String,
}

/// The most recent entries, in feed order, capped at [`RECENT_LOG_LIMIT`].
pub fn recent_logs(logs: &[ProductionLog]) -> &[ProductionLog] {
    &logs[..logs.len().min(RECENT_LOG_LIMIT)]
}

#[cfg(test)]
#[path = "logs_tests.rs"]
mod tests;
