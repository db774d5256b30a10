use crate::config::ClientConfig;
use parley_core::IceServerConfig;
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::peer_connection::configuration::RTCConfiguration;

/// Options for each `webrtc` peer connection.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportConfig {
    pub ice_servers: Vec<IceServerConfig>,
    /// Add a receive-only audio transceiver, for participants without local audio.
    pub receive_audio: bool,
    pub receive_video: bool,
}

impl TransportConfig {
    pub fn receive_only(ice_servers: Vec<IceServerConfig>) -> Self {
        Self {
            ice_servers,
            receive_audio: true,
            receive_video: true,
        }
    }

    pub(crate) fn rtc_configuration(&self) -> RTCConfiguration {
        RTCConfiguration {
            ice_servers: self
                .ice_servers
                .iter()
                .map(|server| RTCIceServer {
                    urls: server.urls.clone(),
                    username: server.username.clone().unwrap_or_default(),
                    credential: server.credential.clone().unwrap_or_default(),
                })
                .collect(),
            ..Default::default()
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            ice_servers: vec![IceServerConfig::default()],
            receive_audio: false,
            receive_video: false,
        }
    }
}

impl From<&ClientConfig> for TransportConfig {
    fn from(config: &ClientConfig) -> Self {
        Self {
            ice_servers: config.ice_servers.clone(),
            ..Self::default()
        }
    }
}
