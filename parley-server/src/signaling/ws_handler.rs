use crate::session::ClientSession;
use crate::signaling::{MessageRouter, RouterAction, SignalingService};
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use parley_core::SignalMessage;
use tokio::sync::mpsc;
use tracing::{error, info};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(service): State<SignalingService>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, service))
}

async fn handle_socket(socket: WebSocket, service: SignalingService) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<SignalMessage>();

    let session = ClientSession::open(tx);
    let peer_id = session.id().clone();
    info!("New WebSocket connection: {}", peer_id);

    let mut router = MessageRouter::new(service.registry().clone(), session);

    // Ends once every handle to this session is gone: the router's own copy
    // and the one held by the registry.
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let json = match msg.encode() {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize signal message: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                return;
            }
        }
        let _ = sender.close().await;
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => {
                    if router.handle_text(text.as_str()) == RouterAction::Close {
                        break;
                    }
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
        router.close();
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => {
            let _ = send_task.await;
        }
    };

    info!("WebSocket disconnected: {}", peer_id);
}
