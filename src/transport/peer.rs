//! Peer media transport

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::SessionError;
use crate::media::MediaStream;
use crate::registry::ParticipantId;
use crate::session::EventSink;

/// An active media connection with one remote participant
pub trait PeerCall: Send + Sync {
    /// Identity of the remote end
    fn remote_peer_id(&self) -> &ParticipantId;

    /// Accept an incoming call, sending `stream`
    fn answer(&self, stream: &MediaStream);

    /// Tear down the connection
    fn close(&self);
}

impl fmt::Debug for dyn PeerCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeerCall")
            .field("remote", self.remote_peer_id())
            .finish()
    }
}

/// Media transport with an assigned local identity
///
/// Reports `ConnectionOpened`, `CallReceived`, `StreamReceived`,
/// `CallError`, `CallClosed` and `PeerError` through its sink.
pub trait PeerTransport: Send {
    /// Identifier assigned to the local participant
    fn local_id(&self) -> &ParticipantId;

    /// Place an outbound call sending `stream`
    fn call(
        &mut self,
        remote: &ParticipantId,
        stream: &MediaStream,
    ) -> Result<Arc<dyn PeerCall>, SessionError>;
}

/// Builds the peer transport with the controller's event sink
#[async_trait]
pub trait PeerConnector: Send {
    async fn connect(
        self: Box<Self>,
        events: EventSink,
    ) -> Result<Box<dyn PeerTransport>, SessionError>;
}
