use parley_core::{IceCandidate, PeerId, SessionDescription, SignalMessage};

use crate::integration::{init_tracing, join_client};
use crate::utils::TestServer;

#[tokio::test]
async fn test_unknown_target_is_dropped() {
    init_tracing();

    let server = TestServer::start().await;
    let (mut a, _) = join_client(&server, "x").await;
    let (mut b, _) = join_client(&server, "x").await;
    a.recv().await.expect("No new-peer");

    b.send(&SignalMessage::offer(
        PeerId::new(),
        SessionDescription::offer("v=0"),
    ))
    .await
    .expect("Send failed");
    b.send(&SignalMessage::candidate(
        PeerId::new(),
        IceCandidate::new("candidate:0"),
    ))
    .await
    .expect("Send failed");
    b.send_raw(r#"{"type":"answer","sdp":{"type":"answer","sdp":"v=0"}}"#)
        .await
        .expect("Send failed");

    a.expect_silence().await.expect("Nothing should reach a");
    b.expect_silence().await.expect("No error is reported to the sender");
}

#[tokio::test]
async fn test_departed_target_is_dropped() {
    init_tracing();

    let server = TestServer::start().await;
    let (mut a, _) = join_client(&server, "x").await;
    let (b, _) = join_client(&server, "x").await;
    let (mut c, _) = join_client(&server, "x").await;
    let b_id = b.id();
    a.recv().await.expect("No new-peer b");
    a.recv().await.expect("No new-peer c");

    b.close().await.expect("Failed to close b");
    assert_eq!(
        c.recv().await.expect("No peer-left"),
        SignalMessage::PeerLeft { id: b_id.clone() }
    );
    a.recv().await.expect("No peer-left");

    c.send(&SignalMessage::answer(b_id, SessionDescription::answer("v=0")))
        .await
        .expect("Send failed");

    a.expect_silence().await.expect("Nothing should reach a");
    c.expect_silence().await.expect("No error is reported to the sender");
}
