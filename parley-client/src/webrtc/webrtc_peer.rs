use std::sync::Arc;

use async_trait::async_trait;
use parley_core::{IceCandidate, PeerId, SdpType, SessionDescription};
use tracing::{debug, info};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::sdp_type::RTCSdpType;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::rtp_transceiver::rtp_codec::RTPCodecType;
use webrtc::rtp_transceiver::rtp_receiver::RTCRtpReceiver;
use webrtc::rtp_transceiver::rtp_transceiver_direction::RTCRtpTransceiverDirection;
use webrtc::rtp_transceiver::{RTCRtpTransceiver, RTCRtpTransceiverInit};
use webrtc::track::track_remote::TrackRemote;

use crate::capability::{
    ConnectionStatus, PeerConnectionFactory, PeerConnectionHandle, PeerEventSink,
};
use crate::error::NegotiationError;
use crate::webrtc::{TransportConfig, WebRtcTrack};

/// Builds a [`WebRtcPeer`] per remote party from a shared [`TransportConfig`].
#[derive(Debug, Clone, Default)]
pub struct WebRtcFactory {
    config: TransportConfig,
}

impl WebRtcFactory {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }
}

#[async_trait]
impl PeerConnectionFactory for WebRtcFactory {
    type Handle = WebRtcPeer;
    type Track = WebRtcTrack;
    type Remote = Arc<TrackRemote>;

    async fn create(
        &self,
        peer_id: &PeerId,
        events: PeerEventSink<Arc<TrackRemote>>,
    ) -> Result<WebRtcPeer, NegotiationError> {
        WebRtcPeer::connect(peer_id.clone(), &self.config, events).await
    }
}

pub struct WebRtcPeer {
    pub peer_id: PeerId,
    pub peer_connection: Arc<RTCPeerConnection>,
}

fn setup_error(e: webrtc::Error) -> NegotiationError {
    NegotiationError::Setup(e.to_string())
}

impl WebRtcPeer {
    /// Creates the peer connection and routes its callbacks into `events`.
    pub async fn connect(
        peer_id: PeerId,
        config: &TransportConfig,
        events: PeerEventSink<Arc<TrackRemote>>,
    ) -> Result<Self, NegotiationError> {
        let mut media_engine = MediaEngine::default();
        media_engine.register_default_codecs().map_err(setup_error)?;
        let registry =
            register_default_interceptors(Registry::new(), &mut media_engine).map_err(setup_error)?;

        let api = APIBuilder::new()
            .with_media_engine(media_engine)
            .with_interceptor_registry(registry)
            .build();

        let peer_connection = Arc::new(
            api.new_peer_connection(config.rtc_configuration())
                .await
                .map_err(setup_error)?,
        );

        let wanted = [
            (config.receive_audio, RTPCodecType::Audio),
            (config.receive_video, RTPCodecType::Video),
        ];
        for (_, kind) in wanted.into_iter().filter(|(wanted, _)| *wanted) {
            peer_connection
                .add_transceiver_from_kind(
                    kind,
                    Some(RTCRtpTransceiverInit {
                        direction: RTCRtpTransceiverDirection::Recvonly,
                        send_encodings: vec![],
                    }),
                )
                .await
                .map_err(setup_error)?;
        }

        let state_events = events.clone();
        peer_connection.on_peer_connection_state_change(Box::new(
            move |s: RTCPeerConnectionState| {
                let events = state_events.clone();
                Box::pin(async move {
                    debug!("Peer connection to {} changed to {:?}", events.peer_id(), s);
                    events.state_changed(connection_status(s));
                })
            },
        ));

        let ice_events = events.clone();
        peer_connection.on_ice_candidate(Box::new(move |c: Option<RTCIceCandidate>| {
            let events = ice_events.clone();
            Box::pin(async move {
                let Some(candidate) = c else { return };
                match candidate.to_json() {
                    Ok(init) => {
                        events.local_candidate(ice_candidate(init));
                    }
                    Err(e) => debug!("Could not serialize local candidate: {}", e),
                }
            })
        }));

        let track_events = events;
        peer_connection.on_track(Box::new(
            move |track: Arc<TrackRemote>,
                  _receiver: Arc<RTCRtpReceiver>,
                  _transceiver: Arc<RTCRtpTransceiver>| {
                let events = track_events.clone();
                Box::pin(async move {
                    let stream_id = track.stream_id();
                    events.remote_track(stream_id, track);
                })
            },
        ));

        info!("WebRTC peer connection ready for {}", peer_id);
        Ok(Self {
            peer_id,
            peer_connection,
        })
    }
}

#[async_trait]
impl PeerConnectionHandle for WebRtcPeer {
    type Track = WebRtcTrack;

    async fn create_offer(&self) -> Result<SessionDescription, NegotiationError> {
        let offer = self
            .peer_connection
            .create_offer(None)
            .await
            .map_err(|e| NegotiationError::CreateDescription {
                kind: "offer",
                reason: e.to_string(),
            })?;
        Ok(SessionDescription::offer(offer.sdp))
    }

    async fn create_answer(&self) -> Result<SessionDescription, NegotiationError> {
        let answer = self
            .peer_connection
            .create_answer(None)
            .await
            .map_err(|e| NegotiationError::CreateDescription {
                kind: "answer",
                reason: e.to_string(),
            })?;
        Ok(SessionDescription::answer(answer.sdp))
    }

    async fn set_local_description(
        &self,
        description: SessionDescription,
    ) -> Result<(), NegotiationError> {
        let desc = rtc_description(description)?;
        self.peer_connection
            .set_local_description(desc)
            .await
            .map_err(|e| NegotiationError::LocalDescription(e.to_string()))
    }

    async fn set_remote_description(
        &self,
        description: SessionDescription,
    ) -> Result<(), NegotiationError> {
        let desc = rtc_description(description)?;
        self.peer_connection
            .set_remote_description(desc)
            .await
            .map_err(|e| NegotiationError::RemoteDescription(e.to_string()))
    }

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<(), NegotiationError> {
        let init = RTCIceCandidateInit {
            candidate: candidate.candidate,
            sdp_mid: candidate.sdp_mid,
            sdp_mline_index: candidate.sdp_m_line_index,
            username_fragment: candidate.username_fragment,
        };
        self.peer_connection
            .add_ice_candidate(init)
            .await
            .map_err(|e| NegotiationError::Candidate(e.to_string()))
    }

    async fn add_track(&self, track: &WebRtcTrack) -> Result<(), NegotiationError> {
        let sender = self
            .peer_connection
            .add_track(track.local())
            .await
            .map_err(|e| NegotiationError::Track(e.to_string()))?;

        // RTCP has to be read for the interceptors to run.
        tokio::spawn(async move {
            let mut buf = vec![0u8; 1500];
            while sender.read(&mut buf).await.is_ok() {}
        });
        Ok(())
    }

    async fn local_description(&self) -> Option<SessionDescription> {
        let desc = self.peer_connection.local_description().await?;
        let sdp_type = match desc.sdp_type {
            RTCSdpType::Offer => SdpType::Offer,
            RTCSdpType::Answer => SdpType::Answer,
            RTCSdpType::Pranswer => SdpType::Pranswer,
            RTCSdpType::Rollback => SdpType::Rollback,
            RTCSdpType::Unspecified => return None,
        };
        Some(SessionDescription {
            sdp_type,
            sdp: desc.sdp,
        })
    }

    async fn close(&self) -> Result<(), NegotiationError> {
        self.peer_connection
            .close()
            .await
            .map_err(|e| NegotiationError::Setup(e.to_string()))
    }
}

fn rtc_description(
    description: SessionDescription,
) -> Result<RTCSessionDescription, NegotiationError> {
    let result = match description.sdp_type {
        SdpType::Offer => RTCSessionDescription::offer(description.sdp),
        SdpType::Answer => RTCSessionDescription::answer(description.sdp),
        other => return Err(NegotiationError::UnsupportedSdp(other)),
    };
    result.map_err(|e| NegotiationError::RemoteDescription(e.to_string()))
}

fn connection_status(state: RTCPeerConnectionState) -> ConnectionStatus {
    match state {
        RTCPeerConnectionState::Unspecified | RTCPeerConnectionState::New => ConnectionStatus::New,
        RTCPeerConnectionState::Connecting => ConnectionStatus::Connecting,
        RTCPeerConnectionState::Connected => ConnectionStatus::Connected,
        RTCPeerConnectionState::Disconnected => ConnectionStatus::Disconnected,
        RTCPeerConnectionState::Failed => ConnectionStatus::Failed,
        RTCPeerConnectionState::Closed => ConnectionStatus::Closed,
    }
}

fn ice_candidate(init: RTCIceCandidateInit) -> IceCandidate {
    IceCandidate {
        candidate: init.candidate,
        sdp_mid: init.sdp_mid,
        sdp_m_line_index: init.sdp_mline_index,
        username_fragment: init.username_fragment,
    }
}
