use crate::config::ServerConfig;
use crate::room::SessionRegistry;
use crate::signaling::ws_handler;
use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tracing::info;

/// Shared state handed to every WebSocket connection.
#[derive(Clone, Default)]
pub struct SignalingService {
    registry: SessionRegistry,
}

impl SignalingService {
    pub fn new(registry: SessionRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Signaling endpoint, served on `/ws` and on `/` so browser clients can
    /// connect to the bare host.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(ws_handler))
            .route("/ws", get(ws_handler))
            .with_state(self.clone())
    }

    /// Serve on an already bound listener until the server fails.
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let app = self.router();
        axum::serve(listener, app)
            .await
            .context("Signaling server stopped")
    }
}

/// Bind to `config` and run the relay.
pub async fn run_server(config: ServerConfig) -> Result<()> {
    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Signaling server listening on ws://{}", addr);
    SignalingService::default().serve(listener).await
}
