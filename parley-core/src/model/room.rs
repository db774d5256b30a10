use crate::utils::DEFAULT_ROOM;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-supplied room name.
#[derive(Debug, Serialize, Deserialize, Clone, Hash, Eq, PartialEq)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Resolve the room named in a `join` request. Absent or empty names map
    /// to [`DEFAULT_ROOM`]; any other name is used exactly as sent.
    pub fn from_request(room: Option<&str>) -> Self {
        match room {
            Some(name) if !name.is_empty() => Self(name.to_owned()),
            _ => Self::default(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RoomId {
    fn default() -> Self {
        Self(DEFAULT_ROOM.to_owned())
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
