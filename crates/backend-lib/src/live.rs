// ============================
// glasshouse-backend-lib/src/live.rs
// ============================
//! Live-feed WebSocket handler.
//!
//! One-way channel: every connected viewer gets the full stream of
//! `LiveMessage`s from the moment it connects. A viewer that falls behind
//! loses the oldest messages and keeps going; it can never slow a publisher
//! down.
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use metrics::gauge;
use tokio::sync::broadcast::error::RecvError;

use crate::events::EventBus;
use crate::metrics::WS_VIEWERS;
use crate::store::CredentialStore;
use crate::AppState;

/// Handler for `GET /ws`
pub async fn feed<S: CredentialStore>(
    ws: WebSocketUpgrade,
    State(state): State<AppState<S>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| stream_to_viewer(socket, state.events.clone()))
}

async fn stream_to_viewer(socket: WebSocket, events: EventBus) {
    gauge!(WS_VIEWERS).increment(1.0);
    tracing::debug!("live-feed viewer connected");

    let (mut sink, mut inbound) = socket.split();
    let mut rx = events.subscribe();

    loop {
        tokio::select! {
            message = rx.recv() => match message {
                Ok(live) => {
                    let json = match serde_json::to_string(&live) {
                        Ok(json) => json,
                        Err(e) => {
                            tracing::error!(error = %e, "failed to serialize live message");
                            continue;
                        },
                    };
                    if sink.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "viewer lagging, dropped oldest messages");
                },
                Err(RecvError::Closed) => break,
            },
            frame = inbound.next() => match frame {
                // viewers never send anything meaningful; only close matters
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {},
            },
        }
    }

    gauge!(WS_VIEWERS).decrement(1.0);
    tracing::debug!("live-feed viewer disconnected");
}
