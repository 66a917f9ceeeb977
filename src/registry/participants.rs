//! Participant registry
//!
//! Holds at most one entry per participant id. The displayed participant
//! count is always derived from `len()`.

use std::collections::HashMap;

use super::entry::ParticipantEntry;
use super::key::ParticipantId;

/// Mapping from participant id to its active call (none for the local participant)
#[derive(Debug, Default)]
pub struct ParticipantRegistry {
    participants: HashMap<ParticipantId, ParticipantEntry>,
}

impl ParticipantRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a participant is registered
    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.participants.contains_key(id)
    }

    /// Register a participant
    ///
    /// Returns false without touching the existing entry if `id` is
    /// already present.
    pub fn insert(&mut self, id: ParticipantId, entry: ParticipantEntry) -> bool {
        if self.participants.contains_key(&id) {
            tracing::debug!(participant = %id, "Participant already registered");
            return false;
        }

        tracing::info!(participant = %id, "Participant registered");
        self.participants.insert(id, entry);
        true
    }

    /// Unregister a participant, returning its entry if present
    pub fn remove(&mut self, id: &ParticipantId) -> Option<ParticipantEntry> {
        let entry = self.participants.remove(id);
        if entry.is_some() {
            tracing::info!(participant = %id, "Participant removed");
        }
        entry
    }

    /// Get a participant's entry
    pub fn get(&self, id: &ParticipantId) -> Option<&ParticipantEntry> {
        self.participants.get(id)
    }

    /// Number of registered participants, local included
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Remove and return every entry
    pub fn drain(&mut self) -> Vec<(ParticipantId, ParticipantEntry)> {
        self.participants.drain().collect()
    }
}
