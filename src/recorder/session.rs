//! Per-participant recorder
//!
//! `Idle -> Recording -> Idle`, re-enterable. Each recording period becomes
//! one `Segment` when it stops.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use parking_lot::Mutex;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::error::RecorderError;
use crate::media::{EncodingProfile, MediaStream};
use crate::registry::ParticipantId;

use super::capture::MediaCapture;
use super::config::RecorderConfig;
use super::export::{ArtifactStore, ExportArtifact};
use super::state::{RecorderState, RecordingId, Segment};

/// A running capture and the buffer its chunks land in
struct ActiveCapture {
    profile: EncodingProfile,
    started_at_ms: u64,
    buffer: Arc<Mutex<Vec<Bytes>>>,
    stop: oneshot::Sender<()>,
    pump: JoinHandle<()>,
}

/// Recording state machine for one participant
pub struct RecorderSession {
    id: RecordingId,
    stream: MediaStream,
    capture: Arc<dyn MediaCapture>,
    config: RecorderConfig,
    active: Option<ActiveCapture>,
    segments: Vec<Segment>,
}

pub(crate) fn now_ms() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

impl RecorderSession {
    /// Create an idle recorder bound to `stream`
    pub fn new(
        participant_id: ParticipantId,
        stream: MediaStream,
        capture: Arc<dyn MediaCapture>,
        config: RecorderConfig,
    ) -> Self {
        Self {
            id: RecordingId {
                participant_id,
                created_at_ms: now_ms(),
            },
            stream,
            capture,
            config,
            active: None,
            segments: Vec::new(),
        }
    }

    /// Identity of this recorder
    pub fn id(&self) -> &RecordingId {
        &self.id
    }

    /// Participant whose stream is recorded
    pub fn participant_id(&self) -> &ParticipantId {
        &self.id.participant_id
    }

    /// The stream this recorder captures
    pub fn stream(&self) -> &MediaStream {
        &self.stream
    }

    /// Current lifecycle state
    pub fn state(&self) -> RecorderState {
        if self.active.is_some() {
            RecorderState::Recording
        } else {
            RecorderState::Idle
        }
    }

    /// Check if a recording period is in progress
    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    /// Completed segments, oldest first
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of chunks in the in-progress buffer
    pub fn pending_chunks(&self) -> usize {
        self.active
            .as_ref()
            .map(|active| active.buffer.lock().len())
            .unwrap_or(0)
    }

    /// Bind a new stream, keeping the segment history. Used when a
    /// participant reconnects; takes effect at the next start.
    pub fn rebind(&mut self, stream: MediaStream) {
        tracing::debug!(
            participant = %self.id.participant_id,
            stream = %stream,
            "Recorder rebound to new stream"
        );
        self.stream = stream;
    }

    /// Start a new recording period
    ///
    /// Fails when no encoding profile is supported, when called outside a
    /// tokio runtime, or when the backend refuses to start. Stays idle
    /// without error if the stream has ended.
    pub fn start_recording(&mut self) -> Result<(), RecorderError> {
        if self.active.is_some() {
            tracing::debug!(participant = %self.id.participant_id, "Already recording");
            return Ok(());
        }

        let capture = Arc::clone(&self.capture);
        let profile = self
            .config
            .preferences
            .negotiate(|mime| capture.is_type_supported(mime))?;

        if !self.stream.is_active() {
            tracing::debug!(
                participant = %self.id.participant_id,
                stream = %self.stream,
                "Stream inactive, not recording"
            );
            return Ok(());
        }

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| RecorderError::CaptureFailed(format!("no tokio runtime: {e}")))?;

        let handle = capture.start(&self.stream, &profile)?;
        let (mut chunks, stop) = handle.into_parts();

        let buffer = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&buffer);
        let participant = self.id.participant_id.clone();
        let pump = runtime.spawn(async move {
            while let Some(chunk) = chunks.recv().await {
                if chunk.is_empty() {
                    continue;
                }
                sink.lock().push(chunk);
            }
            tracing::debug!(participant = %participant, "Capture acknowledged stop");
        });

        tracing::info!(
            participant = %self.id.participant_id,
            mime = %profile.mime_type,
            "Recording started"
        );

        self.active = Some(ActiveCapture {
            profile,
            started_at_ms: now_ms(),
            buffer,
            stop,
            pump,
        });

        Ok(())
    }

    /// Stop the current recording period and finalize it as a segment
    ///
    /// Returns false (and does nothing) if already idle. The wait for
    /// in-flight chunks is bounded by the configured drain timeout; chunks
    /// that miss it are lost.
    pub async fn stop_recording(&mut self) -> bool {
        let Some(mut active) = self.active.take() else {
            tracing::debug!(participant = %self.id.participant_id, "Stop ignored, recorder idle");
            return false;
        };

        let _ = active.stop.send(());
        tracing::info!(
            participant = %self.id.participant_id,
            chunks = active.buffer.lock().len(),
            "Recording stopped"
        );

        let drain = self.config.drain_timeout;
        if tokio::time::timeout(drain, &mut active.pump).await.is_err() {
            active.pump.abort();
            tracing::warn!(
                participant = %self.id.participant_id,
                drain_ms = drain.as_millis() as u64,
                "Capture did not acknowledge stop in time, late chunks dropped"
            );
        }

        let chunks = std::mem::take(&mut *active.buffer.lock());
        self.segments
            .push(Segment::new(active.started_at_ms, active.profile, chunks));

        true
    }

    /// One fresh playable URL per completed segment
    pub fn list_playable_urls(&self, store: &dyn ArtifactStore) -> Vec<String> {
        self.segments
            .iter()
            .map(|segment| store.create_object_url(&segment.to_blob()))
            .collect()
    }

    /// Save every completed segment as its own artifact, in order.
    /// Returns the number of artifacts saved.
    pub fn download(&self, store: &dyn ArtifactStore) -> usize {
        if self.segments.is_empty() {
            return 0;
        }

        for segment in &self.segments {
            let artifact = ExportArtifact {
                file_name: segment.file_name(&self.id.participant_id),
                blob: segment.to_blob(),
            };
            tracing::info!(file = %artifact.file_name, bytes = artifact.blob.len(), "Exporting segment");
            store.save(artifact);
        }

        self.segments.len()
    }
}

impl Drop for RecorderSession {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            active.pump.abort();
        }
    }
}
