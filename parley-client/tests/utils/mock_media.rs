use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parley_client::{CapabilityError, MediaSource, MediaTrack, RemoteTrack, TrackKind};

#[derive(Debug, Clone)]
pub struct MockTrack {
    id: String,
    kind: TrackKind,
    enabled: Arc<AtomicBool>,
    stopped: Arc<AtomicBool>,
}

impl MockTrack {
    pub fn new(id: &str, kind: TrackKind) -> Self {
        Self {
            id: id.to_owned(),
            kind,
            enabled: Arc::new(AtomicBool::new(true)),
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn audio() -> Self {
        Self::new("mic", TrackKind::Audio)
    }

    pub fn video() -> Self {
        Self::new("cam", TrackKind::Video)
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

impl MediaTrack for MockTrack {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn kind(&self) -> TrackKind {
        self.kind
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MockRemoteTrack {
    pub id: String,
}

impl MockRemoteTrack {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_owned() }
    }
}

impl RemoteTrack for MockRemoteTrack {
    fn id(&self) -> String {
        self.id.clone()
    }
}

/// Media source whose permission prompt always gets refused.
pub struct DeniedMedia;

#[async_trait]
impl MediaSource for DeniedMedia {
    type Track = MockTrack;

    async fn acquire(&self) -> Result<Vec<MockTrack>, CapabilityError> {
        Err(CapabilityError::Denied("camera permission refused".to_owned()))
    }
}
