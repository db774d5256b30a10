pub mod multi_peer_tests;

use tracing::Level;

use crate::utils::{TestClient, TestServer};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Connect a client and join `room`, returning it with its welcome peer list.
pub async fn join_client(
    server: &TestServer,
    room: &str,
) -> (TestClient, Vec<parley_core::PeerId>) {
    let mut client = TestClient::connect(server.addr)
        .await
        .expect("Failed to connect");
    let peers = client.join(room).await.expect("Join failed");
    (client, peers)
}
