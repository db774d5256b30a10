use crate::room::Room;
use crate::session::SessionHandle;
use dashmap::DashMap;
use parley_core::{PeerId, RoomId};
use std::sync::Arc;
use tracing::info;

/// Room name → members. Shared by every connection.
///
/// Each operation runs under the map's shard lock for that room, so a
/// concurrent join and leave on the same room never see it half-updated, and
/// an emptied room is dropped before the lock is released.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    rooms: Arc<DashMap<RoomId, Room>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit `session` into `room_id`, creating the room if needed. Returns
    /// the members that were there before it.
    ///
    /// `on_admit` sees those members while the room is still locked and
    /// before `session` is visible to anyone else, so whatever it queues on
    /// `session` arrives ahead of traffic from later joiners.
    pub fn join<F>(
        &self,
        room_id: &RoomId,
        session: SessionHandle,
        on_admit: F,
    ) -> Vec<SessionHandle>
    where
        F: FnOnce(&[SessionHandle]),
    {
        let mut room = self.rooms.entry(room_id.clone()).or_insert_with(|| {
            info!("Creating new room: {}", room_id);
            Room::default()
        });

        let existing = room.others(session.id());
        on_admit(&existing);
        room.insert(session);
        existing
    }

    /// Remove `peer_id` from `room_id`. Returns the members still in the
    /// room; the room itself is deleted once nobody is left.
    pub fn leave(&self, room_id: &RoomId, peer_id: &PeerId) -> Vec<SessionHandle> {
        let mut remaining = Vec::new();

        let removed = self.rooms.remove_if_mut(room_id, |_, room| {
            room.remove(peer_id);
            remaining = room.handles();
            room.is_empty()
        });

        if removed.is_some() {
            info!("Room {} is empty, removing", room_id);
        }
        remaining
    }

    pub fn lookup(&self, room_id: &RoomId, peer_id: &PeerId) -> Option<SessionHandle> {
        self.rooms.get(room_id)?.get(peer_id).cloned()
    }

    pub fn members(&self, room_id: &RoomId) -> Option<Vec<PeerId>> {
        self.rooms.get(room_id).map(|room| room.member_ids())
    }

    pub fn contains_room(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
