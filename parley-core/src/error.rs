use thiserror::Error;

/// Inbound payload that is not a well-formed signaling message.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed signaling message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("failed to encode signaling message: {0}")]
    Encode(serde_json::Error),
}
