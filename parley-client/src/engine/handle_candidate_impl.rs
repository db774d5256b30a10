use parley_core::{IceCandidate, PeerId};
use tracing::{debug, warn};

use crate::capability::{PeerConnectionFactory, PeerConnectionHandle, RemoteRenderer};
use crate::engine::NegotiationCoordinator;

impl<F, R> NegotiationCoordinator<F, R>
where
    F: PeerConnectionFactory,
    R: RemoteRenderer<F::Remote>,
{
    /// Applies a remote candidate, or queues it until the remote description
    /// is in place. Failures never tear the connection down.
    pub(crate) async fn on_candidate(&mut self, from: &PeerId, candidate: IceCandidate) {
        let handle = match self.ensure_connection(from).await {
            Ok(handle) => handle,
            Err(e) => {
                warn!("Dropping candidate from {}: {}", from, e);
                return;
            }
        };

        if let Some(state) = self.peers.get_mut(from) {
            if !state.remote_description_set {
                debug!("Queueing early candidate from {}", from);
                state.pending_candidates.push(candidate);
                return;
            }
        }

        if let Err(e) = handle.add_ice_candidate(candidate).await {
            warn!("Failed to add candidate from {}: {}", from, e);
        }
    }

    /// Marks the remote description as set and replays queued candidates in
    /// arrival order.
    pub(crate) async fn remote_description_applied(&mut self, peer_id: &PeerId) {
        let Some(state) = self.peers.get_mut(peer_id) else {
            return;
        };
        state.remote_description_set = true;
        let pending = std::mem::take(&mut state.pending_candidates);
        let handle = state.handle.clone();

        if !pending.is_empty() {
            debug!("Replaying {} queued candidates for {}", pending.len(), peer_id);
        }
        for candidate in pending {
            if let Err(e) = handle.add_ice_candidate(candidate).await {
                warn!("Failed to add queued candidate from {}: {}", peer_id, e);
            }
        }
    }
}
