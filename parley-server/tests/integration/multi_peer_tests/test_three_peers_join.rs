use parley_core::{PeerId, SignalMessage};

use crate::integration::{init_tracing, join_client};
use crate::utils::TestServer;

fn sorted(mut ids: Vec<PeerId>) -> Vec<PeerId> {
    ids.sort();
    ids
}

#[tokio::test]
async fn test_three_peers_join() {
    init_tracing();

    let server = TestServer::start().await;

    let (mut peer1, welcome1) = join_client(&server, "x").await;
    let (mut peer2, welcome2) = join_client(&server, "x").await;
    let (mut peer3, welcome3) = join_client(&server, "x").await;

    assert!(welcome1.is_empty());
    assert_eq!(welcome2, vec![peer1.id()]);
    assert_eq!(sorted(welcome3), sorted(vec![peer1.id(), peer2.id()]));

    assert_eq!(
        peer1.recv().await.expect("No new-peer 2"),
        SignalMessage::NewPeer { id: peer2.id() }
    );
    assert_eq!(
        peer1.recv().await.expect("No new-peer 3"),
        SignalMessage::NewPeer { id: peer3.id() }
    );
    assert_eq!(
        peer2.recv().await.expect("No new-peer 3"),
        SignalMessage::NewPeer { id: peer3.id() }
    );

    peer1.expect_silence().await.expect("Exactly one new-peer per join");
    peer2.expect_silence().await.expect("Exactly one new-peer per join");
    peer3.expect_silence().await.expect("Joiner gets no new-peer for itself");

    assert_eq!(
        server.members("x"),
        Some(sorted(vec![peer1.id(), peer2.id(), peer3.id()]))
    );
}

#[tokio::test]
async fn test_departed_peer_is_not_listed() {
    init_tracing();

    let server = TestServer::start().await;
    let (mut a, _) = join_client(&server, "x").await;
    let (b, _) = join_client(&server, "x").await;
    let b_id = b.id();
    a.recv().await.expect("No new-peer");

    b.close().await.expect("Failed to close b");
    a.recv().await.expect("No peer-left");

    let (c, welcome) = join_client(&server, "x").await;
    assert_eq!(welcome, vec![a.id()]);
    assert_eq!(
        a.recv().await.expect("No new-peer c"),
        SignalMessage::NewPeer { id: c.id() }
    );
    assert_ne!(c.id(), b_id);
}
