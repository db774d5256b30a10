use std::net::SocketAddr;

use parley_core::{PeerId, RoomId};
use parley_server::{SessionRegistry, SignalingService};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use super::signal_helpers::{CLEANUP_TIMEOUT_MS, wait_until};

/// Relay bound to an ephemeral localhost port.
pub struct TestServer {
    pub addr: SocketAddr,
    service: SignalingService,
    task: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("No local addr");

        let service = SignalingService::default();
        let task = tokio::spawn({
            let service = service.clone();
            async move {
                if let Err(e) = service.serve(listener).await {
                    tracing::error!("[TestServer] stopped: {:?}", e);
                }
            }
        });

        Self {
            addr,
            service,
            task,
        }
    }

    pub fn url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub fn registry(&self) -> &SessionRegistry {
        self.service.registry()
    }

    /// Sorted members of `room`, or `None` if the room does not exist.
    pub fn members(&self, room: &str) -> Option<Vec<PeerId>> {
        self.registry().members(&RoomId::from(room)).map(|mut ids| {
            ids.sort();
            ids
        })
    }

    pub async fn wait_for_room_gone(&self, room: &str) -> bool {
        let room = RoomId::from(room);
        wait_until(CLEANUP_TIMEOUT_MS, || {
            let gone = !self.registry().contains_room(&room);
            async move { gone }
        })
        .await
    }

    pub async fn wait_for_member_count(&self, room: &str, count: usize) -> bool {
        wait_until(CLEANUP_TIMEOUT_MS, || {
            let len = self.members(room).map(|m| m.len()).unwrap_or(0);
            async move { len == count }
        })
        .await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
