use crate::session::SessionHandle;
use parley_core::{PeerId, RoomId, SignalMessage};
use tokio::sync::mpsc;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Unjoined,
    Joined(RoomId),
    Closed,
}

/// Server-side view of one connected party: its identity, its room, and the
/// transport used to reach it.
#[derive(Debug)]
pub struct ClientSession {
    handle: SessionHandle,
    state: SessionState,
}

impl ClientSession {
    /// Start a session for a freshly opened transport with a new random id.
    pub fn open(tx: mpsc::UnboundedSender<SignalMessage>) -> Self {
        Self {
            handle: SessionHandle::new(PeerId::new(), tx),
            state: SessionState::Unjoined,
        }
    }

    pub fn id(&self) -> &PeerId {
        self.handle.id()
    }

    pub fn handle(&self) -> &SessionHandle {
        &self.handle
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn room(&self) -> Option<&RoomId> {
        match &self.state {
            SessionState::Joined(room) => Some(room),
            _ => None,
        }
    }

    pub(crate) fn enter(&mut self, room: RoomId) {
        self.state = SessionState::Joined(room);
    }

    /// Mark the session closed, returning the room it was in, if any.
    pub(crate) fn close(&mut self) -> Option<RoomId> {
        match std::mem::replace(&mut self.state, SessionState::Closed) {
            SessionState::Joined(room) => Some(room),
            _ => None,
        }
    }
}
