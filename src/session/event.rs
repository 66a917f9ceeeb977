//! Session events
//!
//! Every collaborator reports into the controller through an `EventSink`.
//! The controller drains them one at a time in arrival order.

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::media::MediaStream;
use crate::registry::ParticipantId;
use crate::transport::PeerCall;

/// Events delivered to the `SessionController`
pub enum SessionEvent {
    /// Signaling: a participant joined the room
    UserConnected(ParticipantId),
    /// Signaling: a participant left the room
    UserDisconnected(ParticipantId),
    /// Peer transport: non-fatal transport error
    PeerError(String),
    /// Peer transport: local peer is ready, carries the assigned id
    ConnectionOpened(ParticipantId),
    /// Peer transport: a remote participant is calling
    CallReceived(Arc<dyn PeerCall>),
    /// Peer transport: the remote stream of a call arrived
    StreamReceived(Arc<dyn PeerCall>, MediaStream),
    /// Peer transport: a call failed
    CallError(Arc<dyn PeerCall>, String),
    /// Peer transport: a call closed
    CallClosed(Arc<dyn PeerCall>),
    /// View: record toggle changed
    RecordToggled(bool),
    /// View: leave pressed
    LeavePressed,
}

impl fmt::Debug for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionEvent::UserConnected(id) => write!(f, "UserConnected({id})"),
            SessionEvent::UserDisconnected(id) => write!(f, "UserDisconnected({id})"),
            SessionEvent::PeerError(err) => write!(f, "PeerError({err})"),
            SessionEvent::ConnectionOpened(id) => write!(f, "ConnectionOpened({id})"),
            SessionEvent::CallReceived(call) => write!(f, "CallReceived({})", call.remote_peer_id()),
            SessionEvent::StreamReceived(call, stream) => {
                write!(f, "StreamReceived({}, {stream})", call.remote_peer_id())
            }
            SessionEvent::CallError(call, err) => {
                write!(f, "CallError({}, {err})", call.remote_peer_id())
            }
            SessionEvent::CallClosed(call) => write!(f, "CallClosed({})", call.remote_peer_id()),
            SessionEvent::RecordToggled(enabled) => write!(f, "RecordToggled({enabled})"),
            SessionEvent::LeavePressed => f.write_str("LeavePressed"),
        }
    }
}

/// Cloneable handle for reporting events to the controller
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::UnboundedSender<SessionEvent>,
}

impl EventSink {
    /// Create a sink and the receiver the controller drains
    pub fn channel() -> (EventSink, mpsc::UnboundedReceiver<SessionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (EventSink { tx }, rx)
    }

    /// Report an event. Returns false once the controller is gone.
    pub fn send(&self, event: SessionEvent) -> bool {
        match self.tx.send(event) {
            Ok(()) => true,
            Err(mpsc::error::SendError(event)) => {
                tracing::debug!(?event, "Session closed, event dropped");
                false
            }
        }
    }

    /// Whether the controller stopped listening
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
