// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fv-client: transport boundary for the Floorview dashboard.
//!
//! The persistent push channel, the request/response API, auth, config,
//! and the run loop that drives the engine. Everything here degrades to
//! "stale view + retry loop" — no failure is fatal.

pub mod api;
pub mod auth;
pub mod channel;
pub mod config;
pub mod protocol;
pub mod render;
pub mod runloop;

#[cfg(any(test, feature = "test-support"))]
pub use api::FakeApi;
pub use api::{pull_with_retry, ApiError, DashboardApi, WireApi};
pub use auth::{AuthError, AuthProvider, SessionFile, StaticAuthProvider, UserRecord};
pub use channel::{spawn_channel, ChannelEvent, READY_TOKEN, RECONNECT_DELAY};
pub use config::{Config, ConfigError, ServerConfig};
pub use protocol::{ActionReply, AckReply, LogsReply, MachineAction, PushMessage, Request};
#[cfg(any(test, feature = "test-support"))]
pub use render::RecordingSink;
pub use render::RenderSink;
pub use runloop::{run, LoopHandle, UiCommand};
