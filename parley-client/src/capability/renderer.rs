use parley_core::PeerId;

/// Where remote tracks end up. One target per remote party.
pub trait RemoteRenderer<R>: Send + 'static {
    fn create_target(&mut self, peer_id: &PeerId);

    fn attach(&mut self, peer_id: &PeerId, stream_id: &str, track: R);

    fn remove_target(&mut self, peer_id: &PeerId);
}
