//! WebSocket fan-out endpoint.
//!
//! Clients connect to `/ws` and receive every change event broadcast after
//! they connect, as JSON frames `{event, payload}`. No backlog, no
//! acknowledgement, no delivery guarantee.

use std::time::Duration;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;
use tokio::time::interval;

use reliefnet_core::EventBroadcaster;

use crate::server::AppState;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// Upgrades the connection and subscribes it to the event broadcaster.
pub async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    let events = state.events.clone();
    ws.on_upgrade(move |socket| handle_socket(socket, events))
}

async fn handle_socket(socket: WebSocket, events: EventBroadcaster) {
    let mut receiver = events.subscribe();
    let (mut sink, mut stream) = socket.split();
    let mut heartbeat = interval(HEARTBEAT_INTERVAL);
    // The first tick completes immediately; skip it so the heartbeat starts
    // one interval after connect.
    heartbeat.tick().await;

    tracing::debug!("websocket subscriber connected");

    loop {
        tokio::select! {
            event = receiver.recv() => {
                match event {
                    Ok(event) => {
                        let frame = event.to_frame().to_string();
                        if sink.send(Message::Text(frame.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "subscriber lagged, events dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }

            msg = stream.next() => {
                match msg {
                    // The channel is push-only; inbound payloads are ignored.
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::debug!(error = %e, "client websocket error");
                        break;
                    }
                }
            }

            _ = heartbeat.tick() => {
                if sink.send(Message::Ping(Vec::new().into())).await.is_err() {
                    break;
                }
            }
        }
    }

    tracing::debug!("websocket subscriber disconnected");
}
