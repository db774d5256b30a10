/// Room joined when a `join` message names no room.
pub const DEFAULT_ROOM: &str = "default";

pub const DEFAULT_STUN_ADDR: &str = "stun:stun.l.google.com:19302";

pub const DEFAULT_PORT: u16 = 3000;
