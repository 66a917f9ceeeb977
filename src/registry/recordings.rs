//! Recorder registry
//!
//! One `RecorderSession` per participant id, holding that participant's
//! full segment history. Lookups are exact, never by substring.

use std::collections::HashMap;

use crate::recorder::RecorderSession;

use super::key::ParticipantId;

/// Mapping from participant id to its recorder
#[derive(Default)]
pub struct RecordingRegistry {
    recorders: HashMap<ParticipantId, RecorderSession>,
}

impl RecordingRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a recorder under its participant id, replacing any previous one
    pub fn insert(&mut self, recorder: RecorderSession) {
        let id = recorder.participant_id().clone();
        tracing::debug!(participant = %id, recording = %recorder.id(), "Recorder registered");
        self.recorders.insert(id, recorder);
    }

    /// Get the recorder for a participant
    pub fn get(&self, id: &ParticipantId) -> Option<&RecorderSession> {
        self.recorders.get(id)
    }

    /// Get the recorder for a participant, mutably
    pub fn get_mut(&mut self, id: &ParticipantId) -> Option<&mut RecorderSession> {
        self.recorders.get_mut(id)
    }

    /// Iterate over every recorder
    pub fn iter(&self) -> impl Iterator<Item = &RecorderSession> {
        self.recorders.values()
    }

    /// Iterate mutably over every recorder
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut RecorderSession> {
        self.recorders.values_mut()
    }

    /// Number of recorders
    pub fn len(&self) -> usize {
        self.recorders.len()
    }

    /// Total completed segments across every recorder
    pub fn segment_count(&self) -> usize {
        self.recorders.values().map(|r| r.segments().len()).sum()
    }
}
