use crate::error::RouteError;
use crate::room::SessionRegistry;
use crate::session::{ClientSession, SessionState};
use parley_core::{PeerId, RoomId, SignalMessage};
use tracing::{debug, info};

/// What the connection should do after a message has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterAction {
    Continue,
    Close,
}

/// Per-connection signaling state machine.
///
/// Owns the connection's [`ClientSession`] and applies every inbound message
/// to the shared [`SessionRegistry`]. Dropping the router runs the same
/// cleanup as [`MessageRouter::close`], so a connection task that is aborted
/// still leaves its room.
pub struct MessageRouter {
    registry: SessionRegistry,
    session: ClientSession,
}

impl MessageRouter {
    pub fn new(registry: SessionRegistry, session: ClientSession) -> Self {
        Self { registry, session }
    }

    pub fn id(&self) -> &PeerId {
        self.session.id()
    }

    pub fn session(&self) -> &ClientSession {
        &self.session
    }

    /// Decode and route one text frame. Anything that cannot be routed is
    /// logged and dropped without telling the client.
    pub fn handle_text(&mut self, text: &str) -> RouterAction {
        let msg = match SignalMessage::decode(text) {
            Ok(msg) => msg,
            Err(e) => {
                debug!("Ignoring payload from {}: {}", self.id(), e);
                return RouterAction::Continue;
            }
        };

        match self.handle_message(msg) {
            Ok(action) => action,
            Err(e) => {
                debug!("Dropped message from {}: {}", self.id(), e);
                RouterAction::Continue
            }
        }
    }

    pub fn handle_message(&mut self, msg: SignalMessage) -> Result<RouterAction, RouteError> {
        match msg {
            SignalMessage::Join { room } => {
                self.join(RoomId::from_request(room.as_deref()))?;
                Ok(RouterAction::Continue)
            }
            SignalMessage::Leave => {
                self.current_room()?;
                Ok(RouterAction::Close)
            }
            msg @ (SignalMessage::Offer { .. }
            | SignalMessage::Answer { .. }
            | SignalMessage::Candidate { .. }) => {
                self.forward(msg)?;
                Ok(RouterAction::Continue)
            }
            other => Err(RouteError::UnexpectedMessage(other.kind())),
        }
    }

    /// Leave the room (if any) and tell the remaining members. Idempotent.
    pub fn close(&mut self) {
        let Some(room) = self.session.close() else {
            return;
        };

        let id = self.session.id().clone();
        let remaining = self.registry.leave(&room, &id);
        for member in &remaining {
            member.send(SignalMessage::PeerLeft { id: id.clone() });
        }

        info!("Client {} left {}", id, room);
    }

    fn current_room(&self) -> Result<RoomId, RouteError> {
        match self.session.state() {
            SessionState::Joined(room) => Ok(room.clone()),
            SessionState::Unjoined => Err(RouteError::NotJoined),
            SessionState::Closed => Err(RouteError::Closed),
        }
    }

    fn join(&mut self, room: RoomId) -> Result<(), RouteError> {
        match self.session.state() {
            SessionState::Unjoined => {}
            SessionState::Joined(current) => return Err(RouteError::AlreadyJoined(current.clone())),
            SessionState::Closed => return Err(RouteError::Closed),
        }

        let handle = self.session.handle().clone();
        let id = handle.id().clone();
        // Welcome is queued before the joiner is visible, so no new-peer from
        // a concurrent joiner can overtake it.
        let existing = self.registry.join(&room, handle.clone(), |existing| {
            handle.send(SignalMessage::Welcome {
                id: id.clone(),
                peers: existing.iter().map(|s| s.id().clone()).collect(),
            });
        });
        for member in &existing {
            member.send(SignalMessage::NewPeer { id: id.clone() });
        }

        info!("Client {} joined {} ({} existing peers)", id, room, existing.len());
        self.session.enter(room);
        Ok(())
    }

    fn forward(&self, msg: SignalMessage) -> Result<(), RouteError> {
        let room = self.current_room()?;
        let kind = msg.kind();
        let target = msg.target().cloned().ok_or(RouteError::MissingTarget(kind))?;

        let recipient = self
            .registry
            .lookup(&room, &target)
            .ok_or_else(|| RouteError::UnknownTarget(target.clone()))?;

        let stamped = msg
            .with_sender(self.id().clone())
            .ok_or(RouteError::UnexpectedMessage(kind))?;

        debug!("Relaying {} from {} to {}", kind, self.id(), target);
        recipient.send(stamped);
        Ok(())
    }
}

impl Drop for MessageRouter {
    fn drop(&mut self) {
        self.close();
    }
}
