use std::collections::HashMap;
use std::sync::Arc;

use parley_core::PeerId;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use webrtc::track::track_remote::TrackRemote;

use crate::capability::{RemoteRenderer, RemoteTrack};

impl RemoteTrack for Arc<TrackRemote> {
    fn id(&self) -> String {
        TrackRemote::id(self)
    }
}

/// Headless renderer: drains incoming RTP for each attached track and logs
/// how much arrived.
#[derive(Default)]
pub struct LoggingRenderer {
    targets: HashMap<PeerId, Vec<JoinHandle<()>>>,
}

impl LoggingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }
}

impl RemoteRenderer<Arc<TrackRemote>> for LoggingRenderer {
    fn create_target(&mut self, peer_id: &PeerId) {
        info!("Receiving media from {}", peer_id);
        self.targets.entry(peer_id.clone()).or_default();
    }

    fn attach(&mut self, peer_id: &PeerId, stream_id: &str, track: Arc<TrackRemote>) {
        let label = format!("{}/{}/{}", peer_id.short(), stream_id, track.id());
        info!("Track {} ({:?}) attached", label, track.kind());

        let task = tokio::spawn(async move {
            let mut packets: u64 = 0;
            while track.read_rtp().await.is_ok() {
                packets += 1;
                if packets % 500 == 0 {
                    debug!("Track {}: {} packets", label, packets);
                }
            }
            info!("Track {} ended after {} packets", label, packets);
        });
        self.targets.entry(peer_id.clone()).or_default().push(task);
    }

    fn remove_target(&mut self, peer_id: &PeerId) {
        if let Some(tasks) = self.targets.remove(peer_id) {
            for task in tasks {
                task.abort();
            }
            info!("Stopped receiving media from {}", peer_id);
        }
    }
}

impl Drop for LoggingRenderer {
    fn drop(&mut self) {
        for task in self.targets.values().flatten() {
            task.abort();
        }
    }
}
