use parley_core::{PeerId, SignalMessage};
use tokio::sync::mpsc;
use tracing::debug;

/// Outbound side of one client's transport.
///
/// Cloned into the registry so other sessions can address this client. Sends
/// are fire-and-forget: a closed transport just drops the message.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    id: PeerId,
    tx: mpsc::UnboundedSender<SignalMessage>,
}

impl SessionHandle {
    pub fn new(id: PeerId, tx: mpsc::UnboundedSender<SignalMessage>) -> Self {
        Self { id, tx }
    }

    pub fn id(&self) -> &PeerId {
        &self.id
    }

    /// Queue a message for the client. Returns `false` if its transport is
    /// already gone.
    pub fn send(&self, msg: SignalMessage) -> bool {
        match self.tx.send(msg) {
            Ok(()) => true,
            Err(e) => {
                debug!(
                    "Dropping '{}' for disconnected session {}",
                    e.0.kind(),
                    self.id
                );
                false
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
