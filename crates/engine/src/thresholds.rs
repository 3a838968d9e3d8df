// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Progress-threshold evaluation.
//!
//! Runs against every full authoritative refresh. Stateless by design: a
//! machine holding 95% across ten pushes fires ten danger alerts, and
//! auto-expiry (not dedup) keeps the feed readable. Tunable policy, not
//! a defect.

use fv_core::alert::{Alert, Severity};
use fv_core::clock::Clock;
use fv_core::snapshot::Snapshot;

/// Scan all machines with a job and emit at most one alert per machine
/// based on its progress bucket.
pub fn evaluate(snapshot: &Snapshot, clock: &impl Clock) -> Vec<Alert> {
    let mut alerts = Vec::new();
    for (_, machine) in snapshot.machines() {
        let Some(job) = &machine.job else { continue };
        let p = job.progress_percent;
        let alert = if (75.0..90.0).contains(&p) {
            Alert::new(format!("{} reached 75% progress!", machine.name), Severity::Warning, clock)
        } else if (90.0..100.0).contains(&p) {
            Alert::new(format!("{} reached 90% progress!", machine.name), Severity::Danger, clock)
        } else if p >= 100.0 {
            Alert::new(format!("{} completed!", machine.name), Severity::Success, clock)
        } else {
            continue;
        };
        alerts.push(alert);
    }
    alerts
}

#[cfg(test)]
#[path = "thresholds_tests.rs"]
mod tests;
