use parley_core::{PeerId, SessionDescription, SignalMessage};
use tracing::{info, warn};

use crate::capability::{PeerConnectionFactory, PeerConnectionHandle, RemoteRenderer};
use crate::engine::NegotiationCoordinator;
use crate::error::NegotiationError;

impl<F, R> NegotiationCoordinator<F, R>
where
    F: PeerConnectionFactory,
    R: RemoteRenderer<F::Remote>,
{
    /// Offers to a peer that was already in the room when we joined.
    pub(crate) async fn initiate(&mut self, peer_id: &PeerId) {
        if let Err(e) = self.try_initiate(peer_id).await {
            warn!("Failed to offer to {}: {}", peer_id, e);
        }
    }

    async fn try_initiate(&mut self, peer_id: &PeerId) -> Result<(), NegotiationError> {
        let handle = self.ensure_connection(peer_id).await?;
        let offer = handle.create_offer().await?;
        handle.set_local_description(offer.clone()).await?;
        let local = handle.local_description().await.unwrap_or(offer);

        info!("Sending offer to {}", peer_id);
        self.send(SignalMessage::offer(peer_id.clone(), local));
        Ok(())
    }

    pub(crate) async fn on_offer(&mut self, from: &PeerId, description: SessionDescription) {
        if let Err(e) = self.try_answer(from, description).await {
            warn!("Failed to answer offer from {}: {}", from, e);
        }
    }

    async fn try_answer(
        &mut self,
        from: &PeerId,
        description: SessionDescription,
    ) -> Result<(), NegotiationError> {
        let handle = self.ensure_connection(from).await?;
        handle.set_remote_description(description).await?;
        self.remote_description_applied(from).await;

        let answer = handle.create_answer().await?;
        handle.set_local_description(answer.clone()).await?;
        let local = handle.local_description().await.unwrap_or(answer);

        info!("Sending answer to {}", from);
        self.send(SignalMessage::answer(from.clone(), local));
        Ok(())
    }

    pub(crate) async fn on_answer(&mut self, from: &PeerId, description: SessionDescription) {
        match self.try_apply_answer(from, description).await {
            Ok(()) => info!("Answer from {} applied", from),
            Err(e) => warn!("Failed to apply answer from {}: {}", from, e),
        }
    }

    async fn try_apply_answer(
        &mut self,
        from: &PeerId,
        description: SessionDescription,
    ) -> Result<(), NegotiationError> {
        let handle = self.ensure_connection(from).await?;
        handle.set_remote_description(description).await?;
        self.remote_description_applied(from).await;
        Ok(())
    }
}
