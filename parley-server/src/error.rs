use parley_core::{PeerId, RoomId};
use thiserror::Error;

/// Reasons an inbound message produced no outbound traffic.
///
/// None of these are reported to the client; the router logs them and moves
/// on.
#[derive(Debug, Error, PartialEq)]
pub enum RouteError {
    #[error("session has not joined a room")]
    NotJoined,

    #[error("session already joined room '{0}'")]
    AlreadyJoined(RoomId),

    #[error("session is closed")]
    Closed,

    #[error("'{0}' message has no target")]
    MissingTarget(&'static str),

    #[error("target {0} is not in the sender's room")]
    UnknownTarget(PeerId),

    #[error("'{0}' is not accepted from clients")]
    UnexpectedMessage(&'static str),
}
