use parley_core::{ProtocolError, SdpType};
use thiserror::Error;

/// A peer connection operation failed.
///
/// Logged and swallowed by the coordinator; the connection is only torn down
/// when the handle itself reports a terminal state.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NegotiationError {
    #[error("peer connection setup failed: {0}")]
    Setup(String),

    #[error("could not create {kind}: {reason}")]
    CreateDescription { kind: &'static str, reason: String },

    #[error("could not apply local description: {0}")]
    LocalDescription(String),

    #[error("could not apply remote description: {0}")]
    RemoteDescription(String),

    #[error("could not add ice candidate: {0}")]
    Candidate(String),

    #[error("could not add local track: {0}")]
    Track(String),

    #[error("session description of type {0:?} is not supported")]
    UnsupportedSdp(SdpType),

    #[error("peer connection is closed")]
    Closed,
}

/// Local media could not be acquired. Blocks room entry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CapabilityError {
    #[error("media access denied: {0}")]
    Denied(String),

    #[error("media source unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Capability(#[from] CapabilityError),

    #[error(transparent)]
    Negotiation(#[from] NegotiationError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("signaling transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("session task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
