// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transient operator alerts.
//!
//! Alerts are ephemeral: created by the threshold evaluator or connection
//! events, expired 10 seconds later, never persisted and never
//! deduplicated. A machine sitting at 95% across ten pushes fires ten
//! danger alerts; operators rely on auto-expiry, not dedup.

use crate::clock::Clock;
use serde::{Deserialize, Serialize};

/// How long an alert stays visible.
pub const ALERT_TTL_MS: u64 = 10_000;

/// Alert severity, ordered by urgency of the operator response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Danger,
    Success,
}

crate::simple_display! {
    Severity {
        Info => "info",
        Warning => "warning",
        Danger => "danger",
        Success => "success",
    }
}

/// A transient notification shown to the operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub message: String,
    pub severity: Severity,
    pub created_at_ms: u64,
}

impl Alert {
    pub fn new(message: impl Into<String>, severity: Severity, clock: &impl Clock) -> Self {
        Self { message: message.into(), severity, created_at_ms: clock.epoch_ms() }
    }

    /// Whether this alert has outlived its TTL.
    pub fn expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.created_at_ms) >= ALERT_TTL_MS
    }
}

/// Live alerts, newest first.
#[derive(Debug, Default)]
pub struct AlertFeed {
    alerts: Vec<Alert>,
}

impl AlertFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend an alert (newest first, matching display order).
    pub fn push(&mut self, alert: Alert) {
        self.alerts.insert(0, alert);
    }

    /// Drop expired alerts. Returns true when anything was removed.
    pub fn expire(&mut self, now_ms: u64) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|a| !a.expired(now_ms));
        self.alerts.len() != before
    }

    pub fn clear(&mut self) {
        self.alerts.clear();
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}

#[cfg(test)]
#[path = "alert_tests.rs"]
mod tests;
