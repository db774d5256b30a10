use std::sync::Arc;

use parley_core::PeerId;
use tracing::{info, warn};

use crate::capability::{PeerConnectionFactory, PeerConnectionHandle, PeerEventSink, RemoteRenderer};
use crate::engine::{NegotiationCoordinator, PeerConnectionState};
use crate::error::NegotiationError;

impl<F, R> NegotiationCoordinator<F, R>
where
    F: PeerConnectionFactory,
    R: RemoteRenderer<F::Remote>,
{
    /// Returns the handle for `peer_id`, creating it and attaching the local
    /// tracks on first use.
    pub async fn ensure_connection(
        &mut self,
        peer_id: &PeerId,
    ) -> Result<Arc<F::Handle>, NegotiationError> {
        if let Some(state) = self.peers.get(peer_id) {
            return Ok(state.handle.clone());
        }

        self.next_generation += 1;
        let generation = self.next_generation;
        let sink = PeerEventSink::new(peer_id.clone(), generation, self.events_tx.clone());
        let handle = Arc::new(self.factory.create(peer_id, sink).await?);

        for track in &self.local_tracks {
            if let Err(e) = handle.add_track(track).await {
                warn!("Failed to attach local track to {}: {}", peer_id, e);
            }
        }

        info!("Peer connection created for {} (generation {})", peer_id, generation);
        self.peers
            .insert(peer_id.clone(), PeerConnectionState::new(handle.clone(), generation));
        Ok(handle)
    }
}
