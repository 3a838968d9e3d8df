// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tokio::net::TcpListener;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(10);

async fn accept_ws(listener: &TcpListener) -> tokio_tungstenite::WebSocketStream<tokio::net::TcpStream> {
    let (stream, _) = listener.accept().await.unwrap();
    tokio_tungstenite::accept_async(stream).await.unwrap()
}

async fn next_event(rx: &mut mpsc::Receiver<ChannelEvent>) -> ChannelEvent {
    timeout(WAIT, rx.recv()).await.unwrap().unwrap()
}

#[tokio::test]
async fn connects_announces_ready_and_forwards_pushes() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());

    let cancel = CancellationToken::new();
    let (tx, mut rx) = mpsc::channel(8);
    let task = spawn_channel(url, tx, cancel.clone());

    let mut server = accept_ws(&listener).await;
    let first = timeout(WAIT, server.next()).await.unwrap().unwrap().unwrap();
    assert_eq!(first, Message::Text(READY_TOKEN.into()));
    assert!(matches!(next_event(&mut rx).await, ChannelEvent::Connected));

    server
        .send(Message::Text(r#"{"locations": [{"name": "Modan", "machines": []}]}"#.into()))
        .await
        .unwrap();
    match next_event(&mut rx).await {
        ChannelEvent::Push(update) => {
            assert_eq!(update.snapshot.locations[0].name, "Modan");
            assert!(update.new_job.is_none());
        }
        other => panic!("expected a push, got {other:?}"),
    }

    cancel.cancel();
    task.await.unwrap();
}

#[tokio::test]
async fn garbage_frames_surface_as_parse_errors_and_do_not_kill_the_stream() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());

    let cancel = CancellationToken::new();
    let (tx, mut rx) = mpsc::channel(8);
    let task = spawn_channel(url, tx, cancel.clone());

    let mut server = accept_ws(&listener).await;
    let _ready = timeout(WAIT, server.next()).await.unwrap();
    assert!(matches!(next_event(&mut rx).await, ChannelEvent::Connected));

    server.send(Message::Text("not json".into())).await.unwrap();
    assert!(matches!(next_event(&mut rx).await, ChannelEvent::ParseError(_)));

    // The stream is still alive afterwards.
    server.send(Message::Text("{}".into())).await.unwrap();
    assert!(matches!(next_event(&mut rx).await, ChannelEvent::Push(_)));

    cancel.cancel();
    task.await.unwrap();
}

// Real time: the reconnect delay actually elapses.
#[tokio::test]
async fn reconnects_after_the_server_drops() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());

    let cancel = CancellationToken::new();
    let (tx, mut rx) = mpsc::channel(8);
    let task = spawn_channel(url, tx, cancel.clone());

    let mut server = accept_ws(&listener).await;
    let _ready = timeout(WAIT, server.next()).await.unwrap();
    assert!(matches!(next_event(&mut rx).await, ChannelEvent::Connected));

    server.close(None).await.unwrap();
    drop(server);
    assert!(matches!(next_event(&mut rx).await, ChannelEvent::Disconnected));

    // A new connection arrives after the fixed delay.
    let mut server = accept_ws(&listener).await;
    let again = timeout(WAIT, server.next()).await.unwrap().unwrap().unwrap();
    assert_eq!(again, Message::Text(READY_TOKEN.into()));
    assert!(matches!(next_event(&mut rx).await, ChannelEvent::Connected));

    cancel.cancel();
    task.await.unwrap();
}
