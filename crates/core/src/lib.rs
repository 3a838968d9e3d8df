// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fv-core: Core data model for the Floorview operations dashboard client

pub mod macros;

pub mod alert;
pub mod clock;
pub mod countdown;
pub mod logs;
pub mod machine;
pub mod session;
pub mod snapshot;
pub mod store;
pub mod time_fmt;

pub use alert::{Alert, AlertFeed, Severity, ALERT_TTL_MS};
pub use clock::{Clock, FakeClock, SystemClock};
pub use countdown::{CountdownBoard, CountdownKey, CountdownKind};
pub use logs::{recent_logs, ProductionLog, RECENT_LOG_LIMIT};
#[cfg(any(test, feature = "test-support"))]
pub use machine::{JobBuilder, MachineBuilder, QueuedJobBuilder};
pub use machine::{Job, Machine, MachineId, MachineStatus, QueuedJob};
pub use session::{LocationScope, Role, Session};
pub use snapshot::{Location, Snapshot};
pub use store::SnapshotStore;
pub use time_fmt::format_countdown;
