use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use webrtc::api::media_engine::{MIME_TYPE_OPUS, MIME_TYPE_VP8};
use webrtc::media::Sample;
use webrtc::rtp_transceiver::rtp_codec::RTCRtpCodecCapability;
use webrtc::track::track_local::TrackLocal;
use webrtc::track::track_local::track_local_static_sample::TrackLocalStaticSample;

use crate::capability::{MediaTrack, TrackKind};

/// Local track fed with encoded samples by the application.
///
/// Clones share the same underlying track and flags. While disabled,
/// samples are dropped instead of written.
#[derive(Clone)]
pub struct WebRtcTrack {
    id: String,
    kind: TrackKind,
    track: Arc<TrackLocalStaticSample>,
    enabled: Arc<AtomicBool>,
    stopped: Arc<AtomicBool>,
}

impl WebRtcTrack {
    /// 48kHz stereo Opus.
    pub fn audio(id: impl Into<String>, stream_id: impl Into<String>) -> Self {
        let capability = RTCRtpCodecCapability {
            mime_type: MIME_TYPE_OPUS.to_owned(),
            clock_rate: 48000,
            channels: 2,
            sdp_fmtp_line: "minptime=10;useinbandfec=1".to_owned(),
            rtcp_feedback: vec![],
        };
        Self::new(TrackKind::Audio, capability, id.into(), stream_id.into())
    }

    /// VP8 at the standard 90kHz clock.
    pub fn video(id: impl Into<String>, stream_id: impl Into<String>) -> Self {
        let capability = RTCRtpCodecCapability {
            mime_type: MIME_TYPE_VP8.to_owned(),
            clock_rate: 90000,
            channels: 0,
            sdp_fmtp_line: String::new(),
            rtcp_feedback: vec![],
        };
        Self::new(TrackKind::Video, capability, id.into(), stream_id.into())
    }

    fn new(kind: TrackKind, capability: RTCRtpCodecCapability, id: String, stream_id: String) -> Self {
        Self {
            track: Arc::new(TrackLocalStaticSample::new(capability, id.clone(), stream_id)),
            id,
            kind,
            enabled: Arc::new(AtomicBool::new(true)),
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Writes one encoded sample. Returns `Ok(false)` when the sample was
    /// dropped because the track is disabled or stopped.
    pub async fn write_sample(&self, sample: &Sample) -> Result<bool, webrtc::Error> {
        if self.is_stopped() || !self.is_enabled() {
            return Ok(false);
        }
        self.track.write_sample(sample).await?;
        Ok(true)
    }

    pub(crate) fn local(&self) -> Arc<dyn TrackLocal + Send + Sync> {
        self.track.clone()
    }
}

impl MediaTrack for WebRtcTrack {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn kind(&self) -> TrackKind {
        self.kind
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}
