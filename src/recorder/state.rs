//! Recorder state types

use std::fmt;

use bytes::Bytes;

use crate::media::{EncodingProfile, MediaBlob};
use crate::registry::ParticipantId;

/// Recorder lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecorderState {
    /// Not capturing
    #[default]
    Idle,
    /// Capturing into the current buffer
    Recording,
}

/// Identity of a recorder: its participant and when it was created
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordingId {
    pub participant_id: ParticipantId,
    /// Unix epoch milliseconds
    pub created_at_ms: u64,
}

impl fmt::Display for RecordingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id:{}-when:{}", self.participant_id, self.created_at_ms)
    }
}

/// One finalized recording period. Immutable once appended.
#[derive(Debug, Clone)]
pub struct Segment {
    started_at_ms: u64,
    profile: EncodingProfile,
    chunks: Vec<Bytes>,
}

impl Segment {
    pub(crate) fn new(started_at_ms: u64, profile: EncodingProfile, chunks: Vec<Bytes>) -> Self {
        Self {
            started_at_ms,
            profile,
            chunks,
        }
    }

    /// Unix epoch milliseconds when the recording period started
    pub fn started_at_ms(&self) -> u64 {
        self.started_at_ms
    }

    /// Profile negotiated for this period
    pub fn profile(&self) -> &EncodingProfile {
        &self.profile
    }

    /// Ordered chunks
    pub fn chunks(&self) -> &[Bytes] {
        &self.chunks
    }

    /// Combine all chunks into one playable container
    pub fn to_blob(&self) -> MediaBlob {
        MediaBlob::from_chunks(&self.chunks, self.profile.container.clone())
    }

    /// Export file name: `id:<participant>-when:<epochMillis>.<ext>`
    pub fn file_name(&self, participant_id: &ParticipantId) -> String {
        format!(
            "id:{}-when:{}.{}",
            participant_id, self.started_at_ms, self.profile.extension
        )
    }
}
