use parley_core::SignalMessage;

use crate::integration::{init_tracing, join_client};
use crate::utils::TestServer;

#[tokio::test]
async fn test_leave_message_closes_connection() {
    init_tracing();

    let server = TestServer::start().await;
    let (mut a, _) = join_client(&server, "x").await;
    let (mut b, _) = join_client(&server, "x").await;
    let b_id = b.id();
    a.recv().await.expect("No new-peer");

    b.send(&SignalMessage::Leave).await.expect("Send failed");
    b.wait_closed().await.expect("Relay should close the transport");

    assert_eq!(
        a.recv().await.expect("No peer-left"),
        SignalMessage::PeerLeft { id: b_id }
    );
    assert!(server.wait_for_member_count("x", 1).await);
}
