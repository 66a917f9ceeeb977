//! Media stream handles
//!
//! A `MediaStream` is an opaque, cheaply cloneable handle to a live stream
//! owned by the host. The local stream is shared by the local recorder and
//! every outbound call; a remote stream belongs to exactly one recorder.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::SessionError;

#[derive(Debug)]
struct StreamInner {
    id: String,
    active: AtomicBool,
}

/// Shared handle to a media stream
#[derive(Debug, Clone)]
pub struct MediaStream {
    inner: Arc<StreamInner>,
}

impl MediaStream {
    /// Create a new active stream handle
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(StreamInner {
                id: id.into(),
                active: AtomicBool::new(true),
            }),
        }
    }

    /// Stream identifier assigned by the host
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Whether the stream still delivers media
    pub fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::Acquire)
    }

    /// Mark the stream as ended. Visible through every clone.
    pub fn end(&self) {
        self.inner.active.store(false, Ordering::Release);
    }

    /// Whether two handles refer to the same underlying stream
    pub fn same_stream(&self, other: &MediaStream) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Display for MediaStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.id)
    }
}

/// Source of the local camera stream
#[async_trait]
pub trait CameraProvider: Send {
    /// Acquire the local stream. Failure is fatal to the session.
    async fn local_stream(&mut self) -> Result<MediaStream, SessionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_is_shared_across_clones() {
        let stream = MediaStream::new("cam0");
        let clone = stream.clone();

        assert!(clone.is_active());
        stream.end();
        assert!(!clone.is_active());
        assert!(stream.same_stream(&clone));
    }

    #[test]
    fn test_distinct_streams() {
        let a = MediaStream::new("a");
        let b = MediaStream::new("a");

        assert!(!a.same_stream(&b));
        assert_eq!(a.to_string(), "a");
    }
}
