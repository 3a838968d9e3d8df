// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire protocol for the dashboard server.
//!
//! Request/response wire format: 4-byte length prefix (big-endian) +
//! JSON payload. Push messages arrive as JSON text frames on the
//! persistent channel and share the snapshot shape, with an optional
//! out-of-band `new_job` announcement.

use fv_core::logs::ProductionLog;
use fv_core::machine::{Machine, MachineId};
use fv_core::snapshot::{Location, Snapshot};
use fv_engine::reconciler::{NewJobNotice, PushUpdate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Upper bound on a single frame. Far above any real snapshot; guards
/// against a garbage length prefix.
pub const MAX_FRAME_BYTES: u32 = 16 * 1024 * 1024;

/// Errors from framing and payload decoding.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("frame of {0} bytes exceeds limit")]
    FrameTooLarge(u64),
}

/// A machine control action an operator can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MachineAction {
    Start,
    Pause,
    Stop,
}

fv_core::simple_display! {
    MachineAction {
        Start => "start",
        Pause => "pause",
        Stop => "stop",
    }
}

/// Client→server request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// GET /dashboard — full snapshot pull.
    Dashboard,
    /// GET /production_logs — recent production log entries.
    ProductionLogs,
    /// POST /machine/{start|pause|stop}.
    MachineAction { action: MachineAction, location: String, machine_id: MachineId },
    /// POST /machine/rename.
    RenameMachine { location: String, machine_id: MachineId, new_name: String },
}

/// Reply to a machine action: `ok` plus the updated machine on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionReply {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub machine: Option<Machine>,
}

/// Bare `{ok}` acknowledgement (rename).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AckReply {
    #[serde(default)]
    pub ok: bool,
}

/// Production log feed reply.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LogsReply {
    #[serde(default)]
    pub logs: Vec<ProductionLog>,
}

/// One push frame from the persistent channel.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PushMessage {
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub new_job: Option<NewJobNotice>,
}

impl PushMessage {
    /// Parse a channel text frame. Any JSON failure is the caller's to
    /// surface as a warning; the message is then dropped.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn into_update(self) -> PushUpdate {
        PushUpdate { snapshot: Snapshot { locations: self.locations }, new_job: self.new_job }
    }
}

/// Encode a value as one length-prefixed frame. Payloads over the frame
/// limit are an error, never a truncated prefix.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, ProtocolError> {
    let payload = serde_json::to_vec(value)?;
    if payload.len() > MAX_FRAME_BYTES as usize {
        return Err(ProtocolError::FrameTooLarge(payload.len() as u64));
    }
    let mut frame = Vec::with_capacity(4 + payload.len());
    frame.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    frame.extend_from_slice(&payload);
    Ok(frame)
}

/// Write one length-prefixed frame.
pub async fn write_message<W, T>(writer: &mut W, value: &T) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let frame = encode(value)?;
    writer.write_all(&frame).await?;
    writer.flush().await?;
    Ok(())
}

/// Read one length-prefixed frame.
pub async fn read_message<R, T>(reader: &mut R) -> Result<T, ProtocolError>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned,
{
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf).await?;
    let len = u32::from_be_bytes(len_buf);
    if len > MAX_FRAME_BYTES {
        return Err(ProtocolError::FrameTooLarge(u64::from(len)));
    }
    let mut payload = vec![0u8; len as usize];
    reader.read_exact(&mut payload).await?;
    Ok(serde_json::from_slice(&payload)?)
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
