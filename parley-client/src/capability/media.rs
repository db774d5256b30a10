use async_trait::async_trait;

use crate::error::CapabilityError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    Audio,
    Video,
}

/// A local capture track.
pub trait MediaTrack: Send + Sync + 'static {
    fn id(&self) -> String;
    fn kind(&self) -> TrackKind;
    fn set_enabled(&self, enabled: bool);
    fn is_enabled(&self) -> bool;
    fn stop(&self);
}

/// A track received from a remote party.
pub trait RemoteTrack: Send + 'static {
    fn id(&self) -> String;
}

#[async_trait]
pub trait MediaSource: Send + Sync {
    type Track: MediaTrack;

    async fn acquire(&self) -> Result<Vec<Self::Track>, CapabilityError>;
}

/// A source that hands out a fixed set of tracks. Empty for a receive-only
/// participant.
#[derive(Debug, Clone)]
pub struct StaticMedia<T> {
    tracks: Vec<T>,
}

impl<T> StaticMedia<T> {
    pub fn new(tracks: Vec<T>) -> Self {
        Self { tracks }
    }

    pub fn empty() -> Self {
        Self { tracks: Vec::new() }
    }
}

#[async_trait]
impl<T: MediaTrack + Clone> MediaSource for StaticMedia<T> {
    type Track = T;

    async fn acquire(&self) -> Result<Vec<T>, CapabilityError> {
        Ok(self.tracks.clone())
    }
}
