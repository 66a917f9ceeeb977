//! In-memory collaborators for driving a `SessionController` in tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

use room_recorder::media::{CameraProvider, EncodingProfile, MediaBlob, MediaStream};
use room_recorder::recorder::{
    ArtifactStore, CaptureFeed, CaptureHandle, ExportArtifact, MediaCapture, RecorderConfig,
};
use room_recorder::transport::{
    PeerCall, PeerConnector, PeerTransport, SignalingChannel, SignalingConnector,
    SignalingMessage,
};
use room_recorder::view::{TileSource, VideoTile, ViewPort};
use room_recorder::{
    EventSink, ParticipantId, RecorderError, SessionConfig, SessionDeps, SessionError,
};

pub const ROOM: &str = "room-r";
pub const DRAIN: Duration = Duration::from_millis(10);

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn config() -> SessionConfig {
    SessionConfig::new(ROOM).recorder(RecorderConfig::default().drain_timeout(DRAIN))
}

// ----------------------------------------------------------------------------
// Camera
// ----------------------------------------------------------------------------

pub struct FakeCamera {
    pub result: Result<MediaStream, SessionError>,
}

#[async_trait]
impl CameraProvider for FakeCamera {
    async fn local_stream(&mut self) -> Result<MediaStream, SessionError> {
        tokio::task::yield_now().await;
        self.result.clone()
    }
}

// ----------------------------------------------------------------------------
// View
// ----------------------------------------------------------------------------

#[derive(Default)]
pub struct ViewLog {
    pub tiles: Vec<VideoTile>,
    pub removed: Vec<ParticipantId>,
    pub counts: Vec<usize>,
    pub record_sink: Option<EventSink>,
    pub leave_sink: Option<EventSink>,
    pub record_configured: usize,
    pub leave_configured: usize,
}

impl ViewLog {
    pub fn last_count(&self) -> Option<usize> {
        self.counts.last().copied()
    }

    pub fn url_tiles(&self, id: &str) -> usize {
        self.tiles
            .iter()
            .filter(|t| t.participant_id.as_str() == id && matches!(t.source, TileSource::Url(_)))
            .count()
    }

    pub fn stream_tiles(&self, id: &str) -> Vec<&VideoTile> {
        self.tiles
            .iter()
            .filter(|t| {
                t.participant_id.as_str() == id && matches!(t.source, TileSource::Stream(_))
            })
            .collect()
    }
}

pub struct FakeView(pub Arc<Mutex<ViewLog>>);

impl ViewPort for FakeView {
    fn configure_record_button(&mut self, events: EventSink) {
        let mut log = self.0.lock();
        log.record_configured += 1;
        log.record_sink = Some(events);
    }

    fn configure_leave_button(&mut self, events: EventSink) {
        let mut log = self.0.lock();
        log.leave_configured += 1;
        log.leave_sink = Some(events);
    }

    fn render_video(&mut self, tile: VideoTile) {
        self.0.lock().tiles.push(tile);
    }

    fn remove_video_element(&mut self, participant_id: &ParticipantId) {
        self.0.lock().removed.push(participant_id.clone());
    }

    fn set_participant_count(&mut self, count: usize) {
        self.0.lock().counts.push(count);
    }
}

// ----------------------------------------------------------------------------
// Signaling
// ----------------------------------------------------------------------------

#[derive(Default)]
pub struct SignalingLog {
    pub sink: Option<EventSink>,
    pub emitted: Vec<SignalingMessage>,
    pub connects: usize,
}

pub struct FakeSignalingConnector(pub Arc<Mutex<SignalingLog>>);

struct FakeSignaling(Arc<Mutex<SignalingLog>>);

impl SignalingChannel for FakeSignaling {
    fn emit(&mut self, message: SignalingMessage) {
        self.0.lock().emitted.push(message);
    }
}

#[async_trait]
impl SignalingConnector for FakeSignalingConnector {
    async fn connect(
        self: Box<Self>,
        events: EventSink,
    ) -> Result<Box<dyn SignalingChannel>, SessionError> {
        let mut log = self.0.lock();
        log.connects += 1;
        log.sink = Some(events);
        Ok(Box::new(FakeSignaling(Arc::clone(&self.0))))
    }
}

// ----------------------------------------------------------------------------
// Peer transport
// ----------------------------------------------------------------------------

pub struct FakeCall {
    remote: ParticipantId,
    pub answered_with: Mutex<Vec<String>>,
    pub closed: AtomicBool,
}

impl FakeCall {
    pub fn new(remote: &str) -> Arc<FakeCall> {
        Arc::new(FakeCall {
            remote: ParticipantId::new(remote),
            answered_with: Mutex::new(Vec::new()),
            closed: AtomicBool::new(false),
        })
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl PeerCall for FakeCall {
    fn remote_peer_id(&self) -> &ParticipantId {
        &self.remote
    }

    fn answer(&self, stream: &MediaStream) {
        self.answered_with.lock().push(stream.id().to_string());
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct PeerLog {
    pub sink: Option<EventSink>,
    pub outbound: Vec<(ParticipantId, String)>,
    pub connects: usize,
}

pub struct FakePeerConnector {
    pub local_id: ParticipantId,
    pub log: Arc<Mutex<PeerLog>>,
}

struct FakePeer {
    local_id: ParticipantId,
    log: Arc<Mutex<PeerLog>>,
}

impl PeerTransport for FakePeer {
    fn local_id(&self) -> &ParticipantId {
        &self.local_id
    }

    fn call(
        &mut self,
        remote: &ParticipantId,
        stream: &MediaStream,
    ) -> Result<Arc<dyn PeerCall>, SessionError> {
        self.log
            .lock()
            .outbound
            .push((remote.clone(), stream.id().to_string()));
        Ok(FakeCall::new(remote.as_str()))
    }
}

#[async_trait]
impl PeerConnector for FakePeerConnector {
    async fn connect(
        self: Box<Self>,
        events: EventSink,
    ) -> Result<Box<dyn PeerTransport>, SessionError> {
        {
            let mut log = self.log.lock();
            log.connects += 1;
            log.sink = Some(events);
        }
        Ok(Box::new(FakePeer {
            local_id: self.local_id,
            log: self.log,
        }))
    }
}

// ----------------------------------------------------------------------------
// Capture and storage
// ----------------------------------------------------------------------------

/// Capture backend keyed by stream id. Feeds stay open until
/// `acknowledge` drops them, so stops without it run into the drain timeout.
#[derive(Default)]
pub struct FakeCapture {
    pub feeds: Mutex<HashMap<String, CaptureFeed>>,
    /// Capability queries answered "unsupported" before support kicks in
    pub rejected_queries: AtomicUsize,
    pub refuse_streams: Mutex<Vec<String>>,
    pub starts: AtomicUsize,
}

impl FakeCapture {
    pub fn push(&self, stream: &str, chunk: &'static [u8]) -> bool {
        self.feeds
            .lock()
            .get(stream)
            .map(|feed| feed.push(Bytes::from_static(chunk)))
            .unwrap_or(false)
    }

    pub fn acknowledge(&self, stream: &str) {
        self.feeds.lock().remove(stream);
    }

    pub fn reject_next_queries(&self, n: usize) {
        self.rejected_queries.store(n, Ordering::SeqCst);
    }

    pub fn refuse(&self, stream: &str) {
        self.refuse_streams.lock().push(stream.to_string());
    }
}

impl MediaCapture for FakeCapture {
    fn is_type_supported(&self, _mime_type: &str) -> bool {
        self.rejected_queries
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_err()
    }

    fn start(
        &self,
        stream: &MediaStream,
        _profile: &EncodingProfile,
    ) -> Result<CaptureHandle, RecorderError> {
        if self.refuse_streams.lock().iter().any(|s| s == stream.id()) {
            return Err(RecorderError::CaptureFailed(format!("{} busy", stream.id())));
        }

        self.starts.fetch_add(1, Ordering::SeqCst);
        let (handle, feed) = CaptureHandle::channel();
        self.feeds.lock().insert(stream.id().to_string(), feed);
        Ok(handle)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub saved: Mutex<Vec<ExportArtifact>>,
    urls: AtomicUsize,
}

impl ArtifactStore for MemoryStore {
    fn create_object_url(&self, blob: &MediaBlob) -> String {
        let n = self.urls.fetch_add(1, Ordering::SeqCst);
        format!("blob:mem/{n}?bytes={}", blob.len())
    }

    fn save(&self, artifact: ExportArtifact) {
        self.saved.lock().push(artifact);
    }
}

// ----------------------------------------------------------------------------
// Harness
// ----------------------------------------------------------------------------

pub struct Harness {
    pub local_stream: MediaStream,
    pub view: Arc<Mutex<ViewLog>>,
    pub signaling: Arc<Mutex<SignalingLog>>,
    pub peer: Arc<Mutex<PeerLog>>,
    pub capture: Arc<FakeCapture>,
    pub store: Arc<MemoryStore>,
}

impl Harness {
    pub fn new(local_id: &str) -> (Harness, SessionDeps) {
        let local_stream = MediaStream::new(format!("{local_id}-cam"));
        Self::with_camera(local_id, Ok(local_stream))
    }

    pub fn with_camera(
        local_id: &str,
        camera: Result<MediaStream, SessionError>,
    ) -> (Harness, SessionDeps) {
        let local_stream = camera
            .clone()
            .unwrap_or_else(|_| MediaStream::new("unavailable"));

        let harness = Harness {
            local_stream,
            view: Arc::default(),
            signaling: Arc::default(),
            peer: Arc::default(),
            capture: Arc::default(),
            store: Arc::default(),
        };

        let deps = SessionDeps {
            camera: Box::new(FakeCamera { result: camera }),
            view: Box::new(FakeView(Arc::clone(&harness.view))),
            signaling: Box::new(FakeSignalingConnector(Arc::clone(&harness.signaling))),
            peer: Box::new(FakePeerConnector {
                local_id: ParticipantId::new(local_id),
                log: Arc::clone(&harness.peer),
            }),
            capture: harness.capture.clone(),
            store: harness.store.clone(),
        };

        (harness, deps)
    }

    pub fn peer_sink(&self) -> EventSink {
        self.peer.lock().sink.clone().expect("peer transport connected")
    }

    pub fn signaling_sink(&self) -> EventSink {
        self.signaling.lock().sink.clone().expect("signaling connected")
    }

    pub fn record_sink(&self) -> EventSink {
        self.view.lock().record_sink.clone().expect("record button configured")
    }

    pub fn leave_sink(&self) -> EventSink {
        self.view.lock().leave_sink.clone().expect("leave button configured")
    }

    /// Drop every sink held by the fakes so `run()` can end
    pub fn release_sinks(&self) {
        self.peer.lock().sink = None;
        self.signaling.lock().sink = None;
        let mut view = self.view.lock();
        view.record_sink = None;
        view.leave_sink = None;
    }

    pub fn saved_names(&self) -> Vec<String> {
        self.store
            .saved
            .lock()
            .iter()
            .map(|a| a.file_name.clone())
            .collect()
    }
}
