mod ice;
mod negotiation;
mod peer;
mod room;
mod signaling;

pub use ice::IceServerConfig;
pub use negotiation::{IceCandidate, SdpType, SessionDescription};
pub use peer::PeerId;
pub use room::RoomId;
pub use signaling::SignalMessage;
