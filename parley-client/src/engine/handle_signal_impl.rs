use parley_core::SignalMessage;
use tracing::{debug, info};

use crate::capability::{PeerConnectionFactory, RemoteRenderer};
use crate::engine::NegotiationCoordinator;

impl<F, R> NegotiationCoordinator<F, R>
where
    F: PeerConnectionFactory,
    R: RemoteRenderer<F::Remote>,
{
    pub async fn handle_signal(&mut self, msg: SignalMessage) {
        match msg {
            SignalMessage::Welcome { id, peers } => {
                info!("Joined as {} with {} existing peers", id, peers.len());
                self.self_id = Some(id.clone());
                for peer in peers.into_iter().filter(|p| *p != id) {
                    self.initiate(&peer).await;
                }
            }

            SignalMessage::NewPeer { id } => {
                debug!("Peer {} joined, waiting for its offer", id);
            }

            SignalMessage::Offer {
                from: Some(from),
                sdp,
                ..
            } => self.on_offer(&from, sdp).await,

            SignalMessage::Answer {
                from: Some(from),
                sdp,
                ..
            } => self.on_answer(&from, sdp).await,

            SignalMessage::Candidate {
                from: Some(from),
                candidate,
                ..
            } => self.on_candidate(&from, candidate).await,

            SignalMessage::PeerLeft { id } => self.on_peer_left(&id).await,

            other => debug!("Ignoring unexpected '{}' from relay", other.kind()),
        }
    }
}
