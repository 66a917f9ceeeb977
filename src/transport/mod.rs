//! Signaling and peer transport seams
//!
//! Both transports are external. They are built once during session
//! initialization and receive an `EventSink` through which they report
//! events back to the controller.

pub mod peer;
pub mod signaling;

pub use peer::{PeerCall, PeerConnector, PeerTransport};
pub use signaling::{SignalingChannel, SignalingConnector, SignalingMessage};
