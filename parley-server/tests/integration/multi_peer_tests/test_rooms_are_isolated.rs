use parley_core::{SessionDescription, SignalMessage};

use crate::integration::{init_tracing, join_client};
use crate::utils::TestServer;

#[tokio::test]
async fn test_rooms_are_isolated() {
    init_tracing();

    let server = TestServer::start().await;
    let (mut red1, _) = join_client(&server, "red").await;
    let (mut blue1, welcome) = join_client(&server, "blue").await;
    assert!(welcome.is_empty(), "Other rooms must not be listed");

    red1.expect_silence().await.expect("No new-peer across rooms");

    blue1
        .send(&SignalMessage::offer(
            red1.id(),
            SessionDescription::offer("v=0"),
        ))
        .await
        .expect("Send failed");
    red1.expect_silence().await.expect("No relay across rooms");

    let blue1_id = blue1.id();
    blue1.close().await.expect("Failed to close");
    red1.expect_silence().await.expect("No peer-left across rooms");

    assert!(server.wait_for_room_gone("blue").await);
    assert_eq!(server.members("red"), Some(vec![red1.id()]));
    assert_ne!(blue1_id, red1.id());
}
