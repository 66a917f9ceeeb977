//! Participant entry

use std::sync::Arc;

use crate::media::MediaStream;
use crate::transport::PeerCall;

/// A room member known to the session
#[derive(Clone)]
pub struct ParticipantEntry {
    /// Call carrying this participant's media. `None` for the local participant.
    pub call: Option<Arc<dyn PeerCall>>,

    /// The participant's stream
    pub stream: MediaStream,
}

impl ParticipantEntry {
    /// Entry for a remote participant reached through `call`
    pub fn remote(call: Arc<dyn PeerCall>, stream: MediaStream) -> Self {
        Self {
            call: Some(call),
            stream,
        }
    }

    /// Entry for the local participant
    /// Entry for the local participant, which has no call
    pub fn local(stream: MediaStream) -> Self {
        Self { call: None, stream }
    }

    /// Check if this entry is the local participant
    pub fn is_local(&self) -> bool {
        self.call.is_none()
    }
}

impl std::fmt::Debug for ParticipantEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticipantEntry")
            .field("remote", &self.call.as_ref().map(|c| c.remote_peer_id().clone()))
            .field("stream", &self.stream.id())
            .finish()
    }
}
