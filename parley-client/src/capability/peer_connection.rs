use async_trait::async_trait;
use parley_core::{IceCandidate, PeerId, SessionDescription};

use crate::capability::{MediaTrack, PeerEventSink, RemoteTrack};
use crate::error::NegotiationError;

/// Creates one handle per remote party.
#[async_trait]
pub trait PeerConnectionFactory: Send + Sync + 'static {
    type Handle: PeerConnectionHandle<Track = Self::Track>;
    type Track: MediaTrack;
    type Remote: RemoteTrack;

    async fn create(
        &self,
        peer_id: &PeerId,
        events: PeerEventSink<Self::Remote>,
    ) -> Result<Self::Handle, NegotiationError>;
}

/// The narrow contract the coordinator drives. Candidates, remote tracks and
/// state changes come back through the [`PeerEventSink`] given at creation.
#[async_trait]
pub trait PeerConnectionHandle: Send + Sync + 'static {
    type Track: MediaTrack;

    async fn create_offer(&self) -> Result<SessionDescription, NegotiationError>;

    async fn create_answer(&self) -> Result<SessionDescription, NegotiationError>;

    async fn set_local_description(
        &self,
        description: SessionDescription,
    ) -> Result<(), NegotiationError>;

    async fn set_remote_description(
        &self,
        description: SessionDescription,
    ) -> Result<(), NegotiationError>;

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<(), NegotiationError>;

    async fn add_track(&self, track: &Self::Track) -> Result<(), NegotiationError>;

    /// The description currently applied locally, if any.
    async fn local_description(&self) -> Option<SessionDescription>;

    async fn close(&self) -> Result<(), NegotiationError>;
}
