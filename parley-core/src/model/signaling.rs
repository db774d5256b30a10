use crate::error::ProtocolError;
use crate::model::negotiation::{IceCandidate, SessionDescription};
use crate::model::peer::PeerId;
use serde::{Deserialize, Deserializer, Serialize};

/// Every message exchanged over the signaling socket.
///
/// Directed variants (`offer`, `answer`, `candidate`) carry `target` when sent
/// by a client. The relay sets `from` to the sender's id before delivery and
/// ignores whatever the client put there, including values that are not a
/// peer id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SignalMessage {
    Join {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        room: Option<String>,
    },
    Welcome {
        id: PeerId,
        peers: Vec<PeerId>,
    },
    NewPeer {
        id: PeerId,
    },
    Offer {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<PeerId>,
        #[serde(
            default,
            deserialize_with = "sender_or_none",
            skip_serializing_if = "Option::is_none"
        )]
        from: Option<PeerId>,
        sdp: SessionDescription,
    },
    Answer {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<PeerId>,
        #[serde(
            default,
            deserialize_with = "sender_or_none",
            skip_serializing_if = "Option::is_none"
        )]
        from: Option<PeerId>,
        sdp: SessionDescription,
    },
    Candidate {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<PeerId>,
        #[serde(
            default,
            deserialize_with = "sender_or_none",
            skip_serializing_if = "Option::is_none"
        )]
        from: Option<PeerId>,
        candidate: IceCandidate,
    },
    PeerLeft {
        id: PeerId,
    },
    Leave,
}

impl SignalMessage {
    pub fn join(room: impl Into<String>) -> Self {
        Self::Join {
            room: Some(room.into()),
        }
    }

    pub fn offer(target: PeerId, sdp: SessionDescription) -> Self {
        Self::Offer {
            target: Some(target),
            from: None,
            sdp,
        }
    }

    pub fn answer(target: PeerId, sdp: SessionDescription) -> Self {
        Self::Answer {
            target: Some(target),
            from: None,
            sdp,
        }
    }

    pub fn candidate(target: PeerId, candidate: IceCandidate) -> Self {
        Self::Candidate {
            target: Some(target),
            from: None,
            candidate,
        }
    }

    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Encode)
    }

    /// Wire name of the variant, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Join { .. } => "join",
            Self::Welcome { .. } => "welcome",
            Self::NewPeer { .. } => "new-peer",
            Self::Offer { .. } => "offer",
            Self::Answer { .. } => "answer",
            Self::Candidate { .. } => "candidate",
            Self::PeerLeft { .. } => "peer-left",
            Self::Leave => "leave",
        }
    }

    /// `target` of a directed message; `None` for every other variant.
    pub fn target(&self) -> Option<&PeerId> {
        match self {
            Self::Offer { target, .. }
            | Self::Answer { target, .. }
            | Self::Candidate { target, .. } => target.as_ref(),
            _ => None,
        }
    }

    /// `from` of a directed message; `None` for every other variant.
    pub fn from_peer(&self) -> Option<&PeerId> {
        match self {
            Self::Offer { from, .. } | Self::Answer { from, .. } | Self::Candidate { from, .. } => {
                from.as_ref()
            }
            _ => None,
        }
    }

    /// Stamp the sender on a directed message. Returns `None` for variants
    /// that are never relayed peer-to-peer.
    pub fn with_sender(self, sender: PeerId) -> Option<Self> {
        match self {
            Self::Offer { target, sdp, .. } => Some(Self::Offer {
                target,
                from: Some(sender),
                sdp,
            }),
            Self::Answer { target, sdp, .. } => Some(Self::Answer {
                target,
                from: Some(sender),
                sdp,
            }),
            Self::Candidate {
                target, candidate, ..
            } => Some(Self::Candidate {
                target,
                from: Some(sender),
                candidate,
            }),
            _ => None,
        }
    }
}

/// Reads `from` without letting a bad value reject the whole message.
fn sender_or_none<'de, D>(deserializer: D) -> Result<Option<PeerId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}
