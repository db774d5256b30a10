use parley_core::{PeerId, SignalMessage};
use tracing::{debug, info};

use crate::capability::{
    PeerConnectionFactory, PeerEvent, PeerEventKind, RemoteRenderer, RemoteTrack,
};
use crate::engine::NegotiationCoordinator;

impl<F, R> NegotiationCoordinator<F, R>
where
    F: PeerConnectionFactory,
    R: RemoteRenderer<F::Remote>,
{
    pub async fn handle_peer_event(&mut self, event: PeerEvent<F::Remote>) {
        let PeerEvent {
            peer_id,
            generation,
            kind,
        } = event;

        let current = self.peers.get(&peer_id).map(|s| s.generation);
        if current != Some(generation) {
            debug!(
                "Ignoring event from stale connection to {} (generation {})",
                peer_id, generation
            );
            return;
        }

        match kind {
            PeerEventKind::LocalCandidate(candidate) => {
                self.send(SignalMessage::candidate(peer_id, candidate));
            }
            PeerEventKind::RemoteTrack { stream_id, track } => {
                self.on_remote_track(&peer_id, &stream_id, track);
            }
            PeerEventKind::StateChanged(status) if status.is_terminal() => {
                info!("Connection to {} is {}", peer_id, status);
                self.teardown(&peer_id).await;
            }
            PeerEventKind::StateChanged(status) => {
                debug!("Connection to {} is {}", peer_id, status);
            }
        }
    }

    fn on_remote_track(&mut self, peer_id: &PeerId, stream_id: &str, track: F::Remote) {
        let Some(state) = self.peers.get_mut(peer_id) else {
            return;
        };

        if !state.has_target {
            self.renderer.create_target(peer_id);
            state.has_target = true;
        }

        if !state.rendered_tracks.insert(track.id()) {
            debug!("Track {} from {} already attached", track.id(), peer_id);
            return;
        }
        info!("Attaching remote track {} from {}", track.id(), peer_id);
        self.renderer.attach(peer_id, stream_id, track);
    }
}
