use std::fmt;

use parley_core::{IceCandidate, PeerId};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// Connection state reported by a peer connection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    New,
    Connecting,
    Connected,
    Disconnected,
    Failed,
    Closed,
}

impl ConnectionStatus {
    /// `Disconnected` may recover on its own, so only these two end a connection.
    pub fn is_terminal(self) -> bool {
        matches!(self, ConnectionStatus::Failed | ConnectionStatus::Closed)
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionStatus::New => "new",
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Disconnected => "disconnected",
            ConnectionStatus::Failed => "failed",
            ConnectionStatus::Closed => "closed",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub enum PeerEventKind<R> {
    LocalCandidate(IceCandidate),
    RemoteTrack { stream_id: String, track: R },
    StateChanged(ConnectionStatus),
}

/// Something a peer connection handle observed, tagged with the handle's
/// generation so events from a replaced handle can be told apart.
#[derive(Debug)]
pub struct PeerEvent<R> {
    pub peer_id: PeerId,
    pub generation: u64,
    pub kind: PeerEventKind<R>,
}

/// Given to a handle at creation; the handle reports through it instead of
/// holding callbacks into the coordinator.
pub struct PeerEventSink<R> {
    peer_id: PeerId,
    generation: u64,
    tx: UnboundedSender<PeerEvent<R>>,
}

impl<R> Clone for PeerEventSink<R> {
    fn clone(&self) -> Self {
        Self {
            peer_id: self.peer_id.clone(),
            generation: self.generation,
            tx: self.tx.clone(),
        }
    }
}

impl<R> PeerEventSink<R> {
    pub fn new(peer_id: PeerId, generation: u64, tx: UnboundedSender<PeerEvent<R>>) -> Self {
        Self {
            peer_id,
            generation,
            tx,
        }
    }

    pub fn peer_id(&self) -> &PeerId {
        &self.peer_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn local_candidate(&self, candidate: IceCandidate) -> bool {
        self.emit(PeerEventKind::LocalCandidate(candidate))
    }

    pub fn remote_track(&self, stream_id: impl Into<String>, track: R) -> bool {
        self.emit(PeerEventKind::RemoteTrack {
            stream_id: stream_id.into(),
            track,
        })
    }

    pub fn state_changed(&self, status: ConnectionStatus) -> bool {
        self.emit(PeerEventKind::StateChanged(status))
    }

    /// Returns false once the coordinator has gone away.
    fn emit(&self, kind: PeerEventKind<R>) -> bool {
        let event = PeerEvent {
            peer_id: self.peer_id.clone(),
            generation: self.generation,
            kind,
        };
        if self.tx.send(event).is_err() {
            debug!("Coordinator gone, dropping event from {}", self.peer_id);
            return false;
        }
        true
    }
}
