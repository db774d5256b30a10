use parley_client::{CapabilityError, ClientConfig, ClientError, StaticMedia, join_room};
use parley_core::{PeerId, RoomId, SdpType};
use parley_server::SignalingService;
use tokio::net::TcpListener;

use crate::integration::init_tracing;
use crate::utils::{
    Call, DeniedMedia, MockFactory, MockTrack, RecordingRenderer, WAIT_TIMEOUT_MS, wait_until,
};

async fn start_relay() -> (SignalingService, String) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind relay");
    let addr = listener.local_addr().expect("No local addr");
    let service = SignalingService::default();
    tokio::spawn({
        let service = service.clone();
        async move {
            let _ = service.serve(listener).await;
        }
    });
    (service, format!("ws://{}/ws", addr))
}

fn members(service: &SignalingService, room: &str) -> Vec<PeerId> {
    service
        .registry()
        .members(&RoomId::from(room))
        .unwrap_or_default()
}

#[tokio::test]
async fn test_later_joiner_offers() {
    init_tracing();
    let (service, url) = start_relay().await;
    let config = ClientConfig::new(url, "x");

    let factory_a = MockFactory::new();
    let session_a = join_room(
        &config,
        factory_a.clone(),
        RecordingRenderer::new(),
        &StaticMedia::new(vec![MockTrack::audio()]),
    )
    .await
    .expect("A failed to join");
    assert!(wait_until(WAIT_TIMEOUT_MS, || {
        let count = members(&service, "x").len();
        async move { count == 1 }
    })
    .await);
    let a = members(&service, "x")[0].clone();

    let factory_b = MockFactory::new();
    let session_b = join_room(
        &config,
        factory_b.clone(),
        RecordingRenderer::new(),
        &StaticMedia::new(vec![MockTrack::audio()]),
    )
    .await
    .expect("B failed to join");
    assert!(wait_until(WAIT_TIMEOUT_MS, || {
        let count = members(&service, "x").len();
        async move { count == 2 }
    })
    .await);
    let b = members(&service, "x")
        .into_iter()
        .find(|id| *id != a)
        .expect("B not registered");

    let negotiated = wait_until(WAIT_TIMEOUT_MS, || {
        let done = factory_b.count(&a, &Call::SetRemote(SdpType::Answer)) == 1;
        async move { done }
    })
    .await;
    assert!(negotiated, "B never applied A's answer");

    assert_eq!(factory_b.count(&a, &Call::CreateOffer), 1);
    assert_eq!(factory_a.count(&b, &Call::CreateOffer), 0, "A must not offer");
    assert_eq!(factory_a.count(&b, &Call::SetRemote(SdpType::Offer)), 1);
    assert_eq!(factory_a.count(&b, &Call::CreateAnswer), 1);

    session_b.leave();
    session_b.closed().await.expect("B session failed");

    let torn_down = wait_until(WAIT_TIMEOUT_MS, || {
        let done = factory_a.count(&b, &Call::Close) == 1;
        async move { done }
    })
    .await;
    assert!(torn_down, "A never reacted to peer-left");
    assert_eq!(members(&service, "x"), vec![a]);

    session_a.leave();
    session_a.closed().await.expect("A session failed");
    assert!(
        wait_until(WAIT_TIMEOUT_MS, || {
            let gone = !service.registry().contains_room(&RoomId::from("x"));
            async move { gone }
        })
        .await
    );
}

#[tokio::test]
async fn test_denied_media_blocks_join() {
    init_tracing();
    // Nothing listens here; the media check must fail before connecting.
    let config = ClientConfig::new("ws://127.0.0.1:9/ws", "x");

    let result = join_room(
        &config,
        MockFactory::new(),
        RecordingRenderer::new(),
        &DeniedMedia,
    )
    .await;

    match result {
        Err(ClientError::Capability(CapabilityError::Denied(_))) => {}
        Err(other) => panic!("Expected capability error, got {}", other),
        Ok(_) => panic!("Join should have been refused"),
    }
}
