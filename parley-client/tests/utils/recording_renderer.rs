use std::sync::{Arc, Mutex};

use parley_client::RemoteRenderer;
use parley_core::PeerId;

use super::mock_media::MockRemoteTrack;

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    CreateTarget(PeerId),
    Attach {
        peer: PeerId,
        stream_id: String,
        track_id: String,
    },
    RemoveTarget(PeerId),
}

/// Renderer that only records what it was asked to do. Clones share the log.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    calls: Arc<Mutex<Vec<RenderCall>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl RemoteRenderer<MockRemoteTrack> for RecordingRenderer {
    fn create_target(&mut self, peer_id: &PeerId) {
        self.calls
            .lock()
            .unwrap()
            .push(RenderCall::CreateTarget(peer_id.clone()));
    }

    fn attach(&mut self, peer_id: &PeerId, stream_id: &str, track: MockRemoteTrack) {
        self.calls.lock().unwrap().push(RenderCall::Attach {
            peer: peer_id.clone(),
            stream_id: stream_id.to_owned(),
            track_id: track.id,
        });
    }

    fn remove_target(&mut self, peer_id: &PeerId) {
        self.calls
            .lock()
            .unwrap()
            .push(RenderCall::RemoveTarget(peer_id.clone()));
    }
}
