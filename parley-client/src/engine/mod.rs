use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parley_core::{IceCandidate, PeerId, SignalMessage};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use crate::capability::{
    MediaTrack, PeerConnectionFactory, PeerEvent, RemoteRenderer, TrackKind,
};

mod ensure_connection_impl;
mod handle_candidate_impl;
mod handle_offer_impl;
mod handle_peer_event_impl;
mod handle_signal_impl;
mod teardown_impl;

/// User-facing controls fed into [`NegotiationCoordinator::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Leave,
    SetAudioEnabled(bool),
    SetVideoEnabled(bool),
}

pub(crate) struct PeerConnectionState<H> {
    handle: Arc<H>,
    generation: u64,
    remote_description_set: bool,
    /// Remote candidates that arrived before the remote description.
    pending_candidates: Vec<IceCandidate>,
    has_target: bool,
    rendered_tracks: HashSet<String>,
}

impl<H> PeerConnectionState<H> {
    fn new(handle: Arc<H>, generation: u64) -> Self {
        Self {
            handle,
            generation,
            remote_description_set: false,
            pending_candidates: Vec::new(),
            has_target: false,
            rendered_tracks: HashSet::new(),
        }
    }
}

/// Owns one peer connection per remote party in the room and drives the
/// offer/answer/candidate exchange with them.
///
/// Only the later joiner offers: peers listed in `welcome` get an offer,
/// `new-peer` announcements are left to offer on their own.
pub struct NegotiationCoordinator<F, R>
where
    F: PeerConnectionFactory,
    R: RemoteRenderer<F::Remote>,
{
    factory: F,
    renderer: R,
    local_tracks: Vec<F::Track>,
    peers: HashMap<PeerId, PeerConnectionState<F::Handle>>,
    self_id: Option<PeerId>,
    next_generation: u64,
    outbound: UnboundedSender<SignalMessage>,
    events_tx: UnboundedSender<PeerEvent<F::Remote>>,
    events_rx: Option<UnboundedReceiver<PeerEvent<F::Remote>>>,
}

impl<F, R> NegotiationCoordinator<F, R>
where
    F: PeerConnectionFactory,
    R: RemoteRenderer<F::Remote>,
{
    pub fn new(
        factory: F,
        renderer: R,
        local_tracks: Vec<F::Track>,
        outbound: UnboundedSender<SignalMessage>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            factory,
            renderer,
            local_tracks,
            peers: HashMap::new(),
            self_id: None,
            next_generation: 0,
            outbound,
            events_tx,
            events_rx: Some(events_rx),
        }
    }

    pub fn self_id(&self) -> Option<&PeerId> {
        self.self_id.as_ref()
    }

    pub fn has_peer(&self, peer_id: &PeerId) -> bool {
        self.peers.contains_key(peer_id)
    }

    pub fn peer_ids(&self) -> Vec<PeerId> {
        self.peers.keys().cloned().collect()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn local_tracks(&self) -> &[F::Track] {
        &self.local_tracks
    }

    pub fn set_audio_enabled(&mut self, enabled: bool) {
        self.set_kind_enabled(TrackKind::Audio, enabled);
    }

    pub fn set_video_enabled(&mut self, enabled: bool) {
        self.set_kind_enabled(TrackKind::Video, enabled);
    }

    pub fn is_audio_enabled(&self) -> bool {
        self.is_kind_enabled(TrackKind::Audio)
    }

    pub fn is_video_enabled(&self) -> bool {
        self.is_kind_enabled(TrackKind::Video)
    }

    fn set_kind_enabled(&mut self, kind: TrackKind, enabled: bool) {
        for track in self.local_tracks.iter().filter(|t| t.kind() == kind) {
            track.set_enabled(enabled);
        }
        info!("Local {:?} tracks enabled: {}", kind, enabled);
    }

    fn is_kind_enabled(&self, kind: TrackKind) -> bool {
        self.local_tracks
            .iter()
            .any(|t| t.kind() == kind && t.is_enabled())
    }

    pub(crate) fn send(&self, msg: SignalMessage) {
        let kind = msg.kind();
        if self.outbound.send(msg).is_err() {
            debug!("Signaling channel closed, dropping {}", kind);
        }
    }

    /// Handles every peer event already queued. Returns how many were handled.
    ///
    /// Only meaningful before [`run`](Self::run) takes over the event queue.
    pub async fn process_pending_events(&mut self) -> usize {
        let mut handled = 0;
        loop {
            let next = match self.events_rx.as_mut() {
                Some(rx) => rx.try_recv().ok(),
                None => None,
            };
            let Some(event) = next else { break };
            self.handle_peer_event(event).await;
            handled += 1;
        }
        handled
    }

    /// Event loop: user commands, inbound signaling and peer events, one at a
    /// time. Ends after `Leave` or when either input channel closes.
    pub async fn run(
        mut self,
        mut commands: UnboundedReceiver<Command>,
        mut inbound: UnboundedReceiver<SignalMessage>,
    ) {
        let Some(mut events) = self.events_rx.take() else {
            return;
        };

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::SetAudioEnabled(enabled)) => self.set_audio_enabled(enabled),
                    Some(Command::SetVideoEnabled(enabled)) => self.set_video_enabled(enabled),
                    Some(Command::Leave) | None => {
                        self.leave_room().await;
                        break;
                    }
                },
                msg = inbound.recv() => match msg {
                    Some(msg) => self.handle_signal(msg).await,
                    None => {
                        info!("Signaling connection closed");
                        self.shutdown().await;
                        break;
                    }
                },
                Some(event) = events.recv() => self.handle_peer_event(event).await,
            }
        }
    }
}
