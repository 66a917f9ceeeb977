//! Capture backend seam
//!
//! The capture backend (the media encoder) is external. It reports which
//! MIME types it supports and, once started, delivers encoded chunks over a
//! channel. Closing that channel after a stop request is the backend's stop
//! acknowledgment: no further chunks will arrive.

use bytes::Bytes;
use tokio::sync::{mpsc, oneshot};

use crate::error::RecorderError;
use crate::media::{EncodingProfile, MediaStream};

/// External media encoder with a capability query
pub trait MediaCapture: Send + Sync {
    /// Whether the backend can encode `mime_type`
    fn is_type_supported(&self, mime_type: &str) -> bool;

    /// Start capturing `stream` with `profile`
    fn start(
        &self,
        stream: &MediaStream,
        profile: &EncodingProfile,
    ) -> Result<CaptureHandle, RecorderError>;
}

/// Recorder-side end of a running capture
#[derive(Debug)]
pub struct CaptureHandle {
    chunks: mpsc::UnboundedReceiver<Bytes>,
    stop: oneshot::Sender<()>,
}

/// Backend-side end of a running capture
#[derive(Debug)]
pub struct CaptureFeed {
    chunks: mpsc::UnboundedSender<Bytes>,
    stop: oneshot::Receiver<()>,
    stop_seen: bool,
}

impl CaptureHandle {
    /// Create a connected handle/feed pair
    pub fn channel() -> (CaptureHandle, CaptureFeed) {
        let (chunk_tx, chunk_rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = oneshot::channel();

        (
            CaptureHandle {
                chunks: chunk_rx,
                stop: stop_tx,
            },
            CaptureFeed {
                chunks: chunk_tx,
                stop: stop_rx,
                stop_seen: false,
            },
        )
    }

    pub(crate) fn into_parts(self) -> (mpsc::UnboundedReceiver<Bytes>, oneshot::Sender<()>) {
        (self.chunks, self.stop)
    }
}

impl CaptureFeed {
    /// Deliver a chunk. Returns false once the recorder stopped listening.
    pub fn push(&self, chunk: Bytes) -> bool {
        self.chunks.send(chunk).is_ok()
    }

    /// Another sender for the same chunk channel
    pub fn chunk_sender(&self) -> mpsc::UnboundedSender<Bytes> {
        self.chunks.clone()
    }

    /// Whether the recorder asked the capture to stop
    pub fn stop_requested(&mut self) -> bool {
        if !self.stop_seen
            && !matches!(self.stop.try_recv(), Err(oneshot::error::TryRecvError::Empty))
        {
            self.stop_seen = true;
        }
        self.stop_seen
    }

    /// Wait until the recorder asks the capture to stop (or goes away)
    pub async fn stopped(&mut self) {
        if self.stop_seen {
            return;
        }
        let _ = (&mut self.stop).await;
        self.stop_seen = true;
    }
}
