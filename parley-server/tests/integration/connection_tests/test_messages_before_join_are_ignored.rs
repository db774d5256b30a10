use parley_core::{PeerId, SessionDescription, SignalMessage};

use crate::integration::{init_tracing, join_client};
use crate::utils::{TestClient, TestServer};

#[tokio::test]
async fn test_messages_before_join_are_ignored() {
    init_tracing();

    let server = TestServer::start().await;
    let (mut member, _) = join_client(&server, "x").await;

    let mut stranger = TestClient::connect(server.addr)
        .await
        .expect("Failed to connect");

    stranger
        .send(&SignalMessage::offer(
            member.id(),
            SessionDescription::offer("v=0"),
        ))
        .await
        .expect("Send failed");
    stranger.send(&SignalMessage::Leave).await.expect("Send failed");
    stranger
        .send(&SignalMessage::NewPeer { id: PeerId::new() })
        .await
        .expect("Send failed");

    member.expect_silence().await.expect("Nothing should be relayed");
    stranger.expect_silence().await.expect("No reply before join");

    let peers = stranger.join("x").await.expect("Join should still work");
    assert_eq!(peers, vec![member.id()]);
}
