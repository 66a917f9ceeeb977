//! Session controller
//!
//! Drives the participant lifecycle and the per-participant recorders from
//! signaling, peer transport and view events.

use std::ops::ControlFlow;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::error::Result;
use crate::media::{CameraProvider, MediaStream};
use crate::recorder::{ArtifactStore, MediaCapture, RecorderSession};
use crate::registry::{ParticipantEntry, ParticipantId, ParticipantRegistry, RecordingRegistry};
use crate::transport::{
    PeerCall, PeerConnector, PeerTransport, SignalingChannel, SignalingConnector, SignalingMessage,
};
use crate::view::{TileSource, VideoTile, ViewPort};

use super::config::SessionConfig;
use super::event::{EventSink, SessionEvent};

/// External collaborators consumed by `SessionController::initialize`
pub struct SessionDeps {
    pub camera: Box<dyn CameraProvider>,
    pub view: Box<dyn ViewPort>,
    pub signaling: Box<dyn SignalingConnector>,
    pub peer: Box<dyn PeerConnector>,
    pub capture: Arc<dyn MediaCapture>,
    pub store: Arc<dyn ArtifactStore>,
}

/// Root of the session: owns the local stream, both registries and the
/// record-enabled flag
pub struct SessionController {
    config: SessionConfig,
    local_id: ParticipantId,
    local_stream: MediaStream,
    view: Box<dyn ViewPort>,
    signaling: Box<dyn SignalingChannel>,
    peer: Box<dyn PeerTransport>,
    capture: Arc<dyn MediaCapture>,
    store: Arc<dyn ArtifactStore>,
    participants: ParticipantRegistry,
    recordings: RecordingRegistry,
    recording_enabled: bool,
    events: mpsc::UnboundedReceiver<SessionEvent>,
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("room_id", &self.config.room_id)
            .field("local_id", &self.local_id)
            .field("participants", &self.participants.len())
            .field("recorders", &self.recordings.len())
            .field("recording_enabled", &self.recording_enabled)
            .finish()
    }
}

impl SessionController {
    /// Set up the session
    ///
    /// Wires the view controls, acquires the local stream, builds both
    /// transports and registers the local participant. Any failure here is
    /// fatal to the session.
    pub async fn initialize(config: SessionConfig, deps: SessionDeps) -> Result<Self> {
        let SessionDeps {
            mut camera,
            mut view,
            signaling,
            peer,
            capture,
            store,
        } = deps;

        let (sink, events) = EventSink::channel();

        view.configure_record_button(sink.clone());
        view.configure_leave_button(sink.clone());

        let local_stream = camera.local_stream().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to acquire local stream");
            e
        })?;

        let signaling = signaling.connect(sink.clone()).await?;
        let peer = peer.connect(sink).await?;
        let local_id = peer.local_id().clone();

        tracing::info!(
            room = %config.room_id,
            participant = %local_id,
            stream = %local_stream,
            "Session initialized"
        );

        let mut controller = Self {
            config,
            local_id: local_id.clone(),
            local_stream: local_stream.clone(),
            view,
            signaling,
            peer,
            capture,
            store,
            participants: ParticipantRegistry::new(),
            recordings: RecordingRegistry::new(),
            recording_enabled: false,
            events,
        };

        if controller.add_participant(local_id.clone(), local_stream.clone()) {
            controller
                .participants
                .insert(local_id, ParticipantEntry::local(local_stream));
            controller.refresh_participant_count();
        }

        Ok(controller)
    }

    /// Process events one at a time until leave is pressed or every
    /// collaborator has dropped its sink
    pub async fn run(&mut self) {
        loop {
            let event = match self.events.recv().await {
                Some(event) => event,
                None => {
                    tracing::info!("All event sources closed");
                    break;
                }
            };

            if self.handle_event(event).await.is_break() {
                break;
            }
        }
    }

    /// Dispatch a single event
    pub async fn handle_event(&mut self, event: SessionEvent) -> ControlFlow<()> {
        tracing::trace!(?event, "Handling event");

        match event {
            SessionEvent::UserConnected(id) => self.on_user_connected(&id),
            SessionEvent::UserDisconnected(id) => self.on_user_disconnected(&id).await,
            SessionEvent::PeerError(err) => self.on_peer_error(&err),
            SessionEvent::ConnectionOpened(id) => self.on_peer_connection_opened(&id),
            SessionEvent::CallReceived(call) => self.on_call_received(call),
            SessionEvent::StreamReceived(call, stream) => self.on_stream_received(call, stream),
            SessionEvent::CallError(call, err) => self.on_call_error(call, &err),
            SessionEvent::CallClosed(call) => self.on_call_close(call),
            SessionEvent::RecordToggled(enabled) => self.on_record_toggle(enabled).await,
            SessionEvent::LeavePressed => {
                self.on_leave().await;
                return ControlFlow::Break(());
            }
        }

        ControlFlow::Continue(())
    }

    /// Identifier assigned by the peer transport
    pub fn local_id(&self) -> &ParticipantId {
        &self.local_id
    }

    /// Local camera stream
    pub fn local_stream(&self) -> &MediaStream {
        &self.local_stream
    }

    /// Room joined on connection open
    pub fn room_id(&self) -> &str {
        &self.config.room_id
    }

    /// Check if the record toggle is on
    pub fn is_recording_enabled(&self) -> bool {
        self.recording_enabled
    }

    /// Number of participants, local included
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Get the participant registry
    pub fn participants(&self) -> &ParticipantRegistry {
        &self.participants
    }

    /// Get the recorder registry
    pub fn recordings(&self) -> &RecordingRegistry {
        &self.recordings
    }

    /// Get a participant's recorder
    pub fn recorder(&self, id: &ParticipantId) -> Option<&RecorderSession> {
        self.recordings.get(id)
    }

    /// Attach a recorder and a tile for `id`
    ///
    /// No-op returning false if `id` is already a registered participant;
    /// duplicate stream notifications can race with call answers. A
    /// returning participant keeps its recorder and segment history.
    pub fn add_participant(&mut self, id: ParticipantId, stream: MediaStream) -> bool {
        if self.participants.contains(&id) {
            tracing::debug!(participant = %id, "Duplicate participant ignored");
            return false;
        }

        match self.recordings.get_mut(&id) {
            Some(recorder) => recorder.rebind(stream.clone()),
            None => self.recordings.insert(RecorderSession::new(
                id.clone(),
                stream.clone(),
                Arc::clone(&self.capture),
                self.config.recorder.clone(),
            )),
        }

        if self.recording_enabled {
            if let Some(recorder) = self.recordings.get_mut(&id) {
                if let Err(e) = recorder.start_recording() {
                    tracing::warn!(participant = %id, error = %e, "Could not start recording");
                }
            }
        }

        let is_local = id == self.local_id;
        self.view.render_video(VideoTile {
            participant_id: id,
            muted: false,
            source: TileSource::Stream(stream),
            is_local,
        });

        true
    }

    /// Signaling: call the newcomer with the local stream. Registration
    /// waits for its stream to arrive.
    pub fn on_user_connected(&mut self, id: &ParticipantId) {
        tracing::info!(participant = %id, "User connected");

        match self.peer.call(id, &self.local_stream) {
            Ok(call) => {
                tracing::debug!(participant = %call.remote_peer_id(), "Outbound call placed")
            }
            Err(e) => tracing::warn!(participant = %id, error = %e, "Outbound call failed"),
        }
    }

    /// Signaling: tear down everything belonging to `id`
    pub async fn on_user_disconnected(&mut self, id: &ParticipantId) {
        tracing::info!(participant = %id, "User disconnected");

        let Some(entry) = self.participants.remove(id) else {
            tracing::debug!(participant = %id, "Unknown participant, ignoring disconnect");
            return;
        };

        // A departed peer's stream never produces media again
        if let Some(call) = entry.call {
            call.close();
            entry.stream.end();
        }

        self.refresh_participant_count();
        self.view.remove_video_element(id);
        self.stop_recording(id).await;
    }

    /// Peer transport errors are logged only
    pub fn on_peer_error(&mut self, err: &str) {
        tracing::error!(error = %err, "Peer transport error");
    }

    /// Announce ourselves in the room
    pub fn on_peer_connection_opened(&mut self, self_id: &ParticipantId) {
        tracing::info!(participant = %self_id, room = %self.config.room_id, "Peer connection opened");

        self.signaling.emit(SignalingMessage::JoinRoom {
            room_id: self.config.room_id.clone(),
            participant_id: self_id.clone(),
        });
    }

    /// Answer an incoming call with the local stream
    pub fn on_call_received(&mut self, call: Arc<dyn PeerCall>) {
        tracing::info!(participant = %call.remote_peer_id(), "Answering call");
        call.answer(&self.local_stream);
    }

    /// The only place a remote participant gets registered
    pub fn on_stream_received(&mut self, call: Arc<dyn PeerCall>, stream: MediaStream) {
        let id = call.remote_peer_id().clone();

        if !self.add_participant(id.clone(), stream.clone()) {
            return;
        }

        self.participants
            .insert(id, ParticipantEntry::remote(call, stream));
        self.refresh_participant_count();
    }

    /// Drop the tile only; registry cleanup waits for the disconnect event
    pub fn on_call_error(&mut self, call: Arc<dyn PeerCall>, err: &str) {
        tracing::error!(participant = %call.remote_peer_id(), error = %err, "Call error");
        self.view.remove_video_element(call.remote_peer_id());
    }

    /// Logged only; teardown happens on disconnect
    pub fn on_call_close(&mut self, call: Arc<dyn PeerCall>) {
        tracing::info!(participant = %call.remote_peer_id(), "Call closed");
    }

    /// Flip the record-enabled flag and propagate it to every recorder
    ///
    /// A recorder that fails to start is logged and skipped; the rest
    /// still start.
    pub async fn on_record_toggle(&mut self, enabled: bool) {
        self.recording_enabled = enabled;
        tracing::info!(enabled, recorders = self.recordings.len(), "Recording toggled");

        if enabled {
            for recorder in self.recordings.iter_mut() {
                if recorder.is_recording() {
                    continue;
                }
                if let Err(e) = recorder.start_recording() {
                    tracing::warn!(
                        participant = %recorder.participant_id(),
                        error = %e,
                        "Could not start recording"
                    );
                }
            }
            return;
        }

        let active: Vec<ParticipantId> = self
            .recordings
            .iter()
            .filter(|r| r.is_recording())
            .map(|r| r.participant_id().clone())
            .collect();

        for id in active {
            self.stop_recording(&id).await;
        }
    }

    /// Finish the session: flush running recordings, close calls and
    /// export every completed segment. Returns the number of artifacts saved.
    pub async fn on_leave(&mut self) -> usize {
        tracing::info!(room = %self.config.room_id, "Leaving room");

        for recorder in self.recordings.iter_mut() {
            recorder.stop_recording().await;
        }

        for (id, entry) in self.participants.drain() {
            if let Some(call) = entry.call {
                tracing::debug!(participant = %id, "Closing call");
                call.close();
            }
        }
        self.refresh_participant_count();

        let store = Arc::clone(&self.store);
        let exported: usize = self
            .recordings
            .iter()
            .map(|recorder| recorder.download(store.as_ref()))
            .sum();

        tracing::info!(artifacts = exported, "Recordings exported");
        exported
    }

    /// Stop `id`'s recorder and show its recordings for playback
    async fn stop_recording(&mut self, id: &ParticipantId) {
        let Some(recorder) = self.recordings.get_mut(id) else {
            return;
        };

        if !recorder.stop_recording().await {
            return;
        }

        for url in recorder.list_playable_urls(self.store.as_ref()) {
            self.view.render_video(VideoTile {
                participant_id: id.clone(),
                muted: false,
                source: TileSource::Url(url),
                is_local: false,
            });
        }
    }

    fn refresh_participant_count(&mut self) {
        self.view.set_participant_count(self.participants.len());
    }
}
