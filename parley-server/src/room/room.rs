use crate::session::SessionHandle;
use parley_core::PeerId;
use std::collections::HashMap;

/// Sessions currently signaling to each other under one room name.
#[derive(Debug, Default)]
pub struct Room {
    sessions: HashMap<PeerId, SessionHandle>,
}

impl Room {
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn get(&self, peer_id: &PeerId) -> Option<&SessionHandle> {
        self.sessions.get(peer_id)
    }

    pub(crate) fn insert(&mut self, session: SessionHandle) {
        self.sessions.insert(session.id().clone(), session);
    }

    pub(crate) fn remove(&mut self, peer_id: &PeerId) -> Option<SessionHandle> {
        self.sessions.remove(peer_id)
    }

    /// Every member except `peer_id`.
    pub fn others(&self, peer_id: &PeerId) -> Vec<SessionHandle> {
        self.sessions
            .values()
            .filter(|s| s.id() != peer_id)
            .cloned()
            .collect()
    }

    pub fn handles(&self) -> Vec<SessionHandle> {
        self.sessions.values().cloned().collect()
    }

    pub fn member_ids(&self) -> Vec<PeerId> {
        self.sessions.keys().cloned().collect()
    }
}
