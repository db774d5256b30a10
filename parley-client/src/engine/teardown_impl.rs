use parley_core::{PeerId, SignalMessage};
use tracing::{info, warn};

use crate::capability::{MediaTrack, PeerConnectionFactory, PeerConnectionHandle, RemoteRenderer};
use crate::engine::NegotiationCoordinator;

impl<F, R> NegotiationCoordinator<F, R>
where
    F: PeerConnectionFactory,
    R: RemoteRenderer<F::Remote>,
{
    pub(crate) async fn on_peer_left(&mut self, peer_id: &PeerId) {
        info!("Peer {} left the room", peer_id);
        self.teardown(peer_id).await;
    }

    /// Closes and forgets the connection to `peer_id` along with its
    /// rendering target. No-op for unknown peers.
    pub(crate) async fn teardown(&mut self, peer_id: &PeerId) {
        let Some(state) = self.peers.remove(peer_id) else {
            return;
        };

        if let Err(e) = state.handle.close().await {
            warn!("Error closing connection to {}: {}", peer_id, e);
        }
        if state.has_target {
            self.renderer.remove_target(peer_id);
        }
        info!("Peer connection to {} torn down", peer_id);
    }

    /// Tears down every connection and stops local capture.
    pub(crate) async fn shutdown(&mut self) {
        let peers: Vec<PeerId> = self.peers.keys().cloned().collect();
        for peer_id in peers {
            self.teardown(&peer_id).await;
        }
        for track in &self.local_tracks {
            track.stop();
        }
    }

    /// Leaves the room: every connection closed, local tracks stopped, then
    /// `leave` sent to the relay.
    pub async fn leave_room(&mut self) {
        self.shutdown().await;
        self.send(SignalMessage::Leave);
        info!("Left the room");
    }
}
