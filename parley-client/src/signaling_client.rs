use futures::{SinkExt, StreamExt};
use parley_core::SignalMessage;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use crate::capability::{MediaSource, PeerConnectionFactory, RemoteRenderer};
use crate::config::ClientConfig;
use crate::engine::{Command, NegotiationCoordinator};
use crate::error::ClientError;

/// A joined room. Dropping it without [`Session::leave`] lets the background
/// task run until the relay closes the connection.
pub struct Session {
    commands: UnboundedSender<Command>,
    task: JoinHandle<()>,
}

impl Session {
    pub fn leave(&self) {
        self.command(Command::Leave);
    }

    pub fn set_audio_enabled(&self, enabled: bool) {
        self.command(Command::SetAudioEnabled(enabled));
    }

    pub fn set_video_enabled(&self, enabled: bool) {
        self.command(Command::SetVideoEnabled(enabled));
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits until the session has ended, either by `leave` or because the
    /// relay went away.
    pub async fn closed(self) -> Result<(), ClientError> {
        self.task.await?;
        Ok(())
    }

    fn command(&self, command: Command) {
        if self.commands.send(command).is_err() {
            debug!("Session already ended, ignoring {:?}", command);
        }
    }
}

/// Acquires local media, connects to the relay and joins `config.room`.
///
/// Media is acquired first: a [`CapabilityError`](crate::CapabilityError)
/// is returned before any connection is opened.
pub async fn join_room<F, R, M>(
    config: &ClientConfig,
    factory: F,
    renderer: R,
    media: &M,
) -> Result<Session, ClientError>
where
    F: PeerConnectionFactory,
    R: RemoteRenderer<F::Remote>,
    M: MediaSource<Track = F::Track>,
{
    let tracks = media.acquire().await?;
    info!("Acquired {} local tracks", tracks.len());

    let (ws, _) = connect_async(config.url.as_str()).await?;
    info!("Connected to {}", config.url);
    let (mut sender, mut receiver) = ws.split();

    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<SignalMessage>();
    let (in_tx, in_rx) = mpsc::unbounded_channel::<SignalMessage>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<Command>();

    let _ = out_tx.send(SignalMessage::join(config.room.as_str()));
    let coordinator = NegotiationCoordinator::new(factory, renderer, tracks, out_tx);

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = out_rx.recv().await {
            let text = match msg.encode() {
                Ok(text) => text,
                Err(e) => {
                    warn!("Failed to encode '{}': {}", msg.kind(), e);
                    continue;
                }
            };
            if sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
            if matches!(msg, SignalMessage::Leave) {
                break;
            }
        }
        let _ = sender.close().await;
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(frame)) = receiver.next().await {
            match frame {
                Message::Text(text) => match SignalMessage::decode(text.as_str()) {
                    Ok(msg) => {
                        if in_tx.send(msg).is_err() {
                            break;
                        }
                    }
                    Err(e) => debug!("Ignoring relay payload: {}", e),
                },
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    let task = tokio::spawn(async move {
        coordinator.run(cmd_rx, in_rx).await;

        // The coordinator dropped its sender; let the writer flush `leave`.
        tokio::select! {
            _ = &mut send_task => recv_task.abort(),
            _ = &mut recv_task => {
                let _ = send_task.await;
            }
        }
        info!("Disconnected from relay");
    });

    Ok(Session {
        commands: cmd_tx,
        task,
    })
}
