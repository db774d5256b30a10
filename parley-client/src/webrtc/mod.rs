//! Peer connection capability backed by the `webrtc` crate.

mod logging_renderer;
mod transport_config;
mod webrtc_peer;
mod webrtc_track;

pub use logging_renderer::LoggingRenderer;
pub use transport_config::TransportConfig;
pub use webrtc_peer::{WebRtcFactory, WebRtcPeer};
pub use webrtc_track::WebRtcTrack;
