//! Signaling channel

use async_trait::async_trait;

use crate::error::SessionError;
use crate::registry::ParticipantId;
use crate::session::EventSink;

/// Outbound signaling messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalingMessage {
    /// Announce self-presence in a room
    JoinRoom {
        room_id: String,
        participant_id: ParticipantId,
    },
}

impl SignalingMessage {
    /// Wire event name
    pub fn event_name(&self) -> &'static str {
        match self {
            SignalingMessage::JoinRoom { .. } => "join-room",
        }
    }
}

/// Presence side-channel
///
/// Implementations report `UserConnected` / `UserDisconnected` through the
/// sink handed to their connector.
pub trait SignalingChannel: Send {
    fn emit(&mut self, message: SignalingMessage);
}

/// Builds the signaling channel with the controller's event sink
#[async_trait]
pub trait SignalingConnector: Send {
    async fn connect(
        self: Box<Self>,
        events: EventSink,
    ) -> Result<Box<dyn SignalingChannel>, SessionError>;
}
