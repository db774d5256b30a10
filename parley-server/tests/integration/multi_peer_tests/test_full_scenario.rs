use parley_core::{SessionDescription, SignalMessage};

use crate::integration::{init_tracing, join_client};
use crate::utils::TestServer;

/// Two parties meet in room "x", negotiate, and leave one after the other.
#[tokio::test]
async fn test_full_scenario() {
    init_tracing();

    let server = TestServer::start().await;
    assert!(server.members("x").is_none());

    let (mut a, welcome_a) = join_client(&server, "x").await;
    assert!(welcome_a.is_empty());

    let (mut b, welcome_b) = join_client(&server, "x").await;
    assert_eq!(welcome_b, vec![a.id()]);
    assert_eq!(
        a.recv().await.expect("No new-peer"),
        SignalMessage::NewPeer { id: b.id() }
    );

    let offer = SessionDescription::offer("v=0");
    b.send(&SignalMessage::offer(a.id(), offer.clone()))
        .await
        .expect("Send failed");
    assert_eq!(
        a.recv().await.expect("No offer"),
        SignalMessage::Offer {
            target: Some(a.id()),
            from: Some(b.id()),
            sdp: offer,
        }
    );

    let answer = SessionDescription::answer("v=0");
    a.send(&SignalMessage::answer(b.id(), answer.clone()))
        .await
        .expect("Send failed");
    let delivered = b.recv().await.expect("No answer");
    assert_eq!(delivered.from_peer(), Some(&a.id()));

    let b_id = b.id();
    b.close().await.expect("Failed to close b");
    assert_eq!(
        a.recv().await.expect("No peer-left"),
        SignalMessage::PeerLeft { id: b_id }
    );
    assert!(server.wait_for_member_count("x", 1).await);
    assert_eq!(server.members("x"), Some(vec![a.id()]));

    a.close().await.expect("Failed to close a");
    assert!(server.wait_for_room_gone("x").await, "Room x should be gone");
}
