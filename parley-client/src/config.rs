use parley_core::IceServerConfig;
use parley_core::utils::{DEFAULT_PORT, DEFAULT_ROOM};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    /// WebSocket endpoint of the relay, e.g. `ws://127.0.0.1:3000/ws`.
    pub url: String,
    pub room: String,
    /// ICE servers for the peer connections. `join_room` does not read them;
    /// they reach the connections through the factory's `TransportConfig`
    /// (see `TransportConfig::from(&ClientConfig)`).
    pub ice_servers: Vec<IceServerConfig>,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>, room: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            room: room.into(),
            ..Self::default()
        }
    }

    pub fn with_ice_servers(mut self, ice_servers: Vec<IceServerConfig>) -> Self {
        self.ice_servers = ice_servers;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: format!("ws://127.0.0.1:{DEFAULT_PORT}/ws"),
            room: DEFAULT_ROOM.to_owned(),
            ice_servers: vec![IceServerConfig::default()],
        }
    }
}
