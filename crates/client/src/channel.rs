// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistent push channel.
//!
//! A background task owns the WebSocket: connect, announce readiness,
//! forward pushes, and on any failure sleep a fixed delay and reconnect,
//! forever. The consumer only ever sees [`ChannelEvent`]s.

use crate::protocol::PushMessage;
use fv_engine::reconciler::PushUpdate;
use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

/// Sent once per connection so the server starts streaming.
pub const READY_TOKEN: &str = "ready";

/// Fixed delay between reconnect attempts. No backoff.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(3);

/// What the run loop sees from the channel task.
#[derive(Debug)]
pub enum ChannelEvent {
    /// A connection was established and the ready token sent.
    Connected,
    /// An authoritative push arrived.
    Push(PushUpdate),
    /// A frame arrived but did not parse; the frame was dropped.
    ParseError(String),
    /// The connection dropped; a reconnect is already scheduled.
    Disconnected,
}

/// Spawn the channel task. It runs until `cancel` fires or the event
/// receiver is dropped.
pub fn spawn_channel(
    url: String,
    events: mpsc::Sender<ChannelEvent>,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                () = cancel.cancelled() => return,
                connected = connect_once(&url, &events) => {
                    if connected.is_err() {
                        // Receiver gone: the run loop shut down without us.
                        return;
                    }
                }
            }
            tokio::select! {
                () = cancel.cancelled() => return,
                () = tokio::time::sleep(RECONNECT_DELAY) => {}
            }
        }
    })
}

/// One connection lifetime: connect, stream, report the drop. Returns
/// `Err` only when the event receiver is gone.
async fn connect_once(
    url: &str,
    events: &mpsc::Sender<ChannelEvent>,
) -> Result<(), mpsc::error::SendError<ChannelEvent>> {
    let (mut socket, _) = match connect_async(url).await {
        Ok(pair) => pair,
        Err(error) => {
            tracing::debug!(%url, %error, "channel connect failed");
            return Ok(());
        }
    };

    if let Err(error) = socket.send(Message::Text(READY_TOKEN.into())).await {
        tracing::debug!(%error, "ready token send failed");
        return events.send(ChannelEvent::Disconnected).await;
    }
    events.send(ChannelEvent::Connected).await?;
    tracing::info!(%url, "push channel connected");

    while let Some(frame) = socket.next().await {
        match frame {
            Ok(Message::Text(text)) => match PushMessage::parse(text.as_str()) {
                Ok(message) => events.send(ChannelEvent::Push(message.into_update())).await?,
                Err(error) => {
                    tracing::warn!(%error, "unparseable push frame dropped");
                    events.send(ChannelEvent::ParseError(error.to_string())).await?;
                }
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {} // ping/pong/binary: nothing for us
            Err(error) => {
                tracing::debug!(%error, "channel read error");
                break;
            }
        }
    }

    tracing::info!("push channel disconnected");
    events.send(ChannelEvent::Disconnected).await
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
