//! WebSocket push channel for message-creation events.
//!
//! Each upgraded connection gets its own hub [`Subscription`], registered
//! before the upgrade completes so no creation between handshake and loop
//! start is missed. Every created message is forwarded as one JSON text
//! frame. The loop ends when the client disconnects, the hub closes, or
//! server shutdown is signalled; the subscription (and with it the
//! listener registration) is dropped on exit.

use axum::extract::ws::{Message as WsMessage, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use tracing::{debug, info, warn};

use super::AppState;
use crate::storage::Subscription;

/// Upgrades an HTTP connection into a push-channel subscriber.
pub async fn ws_upgrade_handler(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    // Subscribe before the upgrade completes: the subscription's view of
    // the event stream starts here, not when the socket task first polls.
    let subscription = state.hub.subscribe();
    ws.on_upgrade(move |socket| stream_created_messages(socket, subscription, state))
}

/// Forwards created messages to one subscriber until it goes away.
async fn stream_created_messages(
    mut socket: WebSocket,
    mut subscription: Subscription,
    state: AppState,
) {
    let id = state.registry.register();
    let _in_flight = state.shutdown.in_flight_guard();
    let mut shutdown = state.shutdown.shutdown_receiver();
    info!(connection = id.0, "subscriber connected");

    loop {
        tokio::select! {
            event = subscription.recv() => {
                let Some(message) = event else {
                    // Hub gone; nothing further will ever be delivered.
                    break;
                };
                let frame = match serde_json::to_string(&message) {
                    Ok(frame) => frame,
                    Err(error) => {
                        warn!(connection = id.0, %error, "failed to encode event; skipping");
                        continue;
                    }
                };
                if socket.send(WsMessage::Text(frame.into())).await.is_err() {
                    break;
                }
            }
            incoming = socket.recv() => {
                match incoming {
                    // Inbound frames carry no meaning on this channel;
                    // drain them to keep ping/pong handling alive.
                    Some(Ok(WsMessage::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(other)) => {
                        debug!(connection = id.0, frame = ?other, "ignoring inbound frame");
                    }
                }
            }
            _ = shutdown.changed() => {
                let _ = socket.send(WsMessage::Close(None)).await;
                break;
            }
        }
    }

    state.registry.remove(id);
    info!(connection = id.0, "subscriber disconnected");
}
