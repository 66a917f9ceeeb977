//! Multi-participant room sessions with per-participant recording
//!
//! `room-recorder` coordinates a real-time room: remote participants join
//! and leave through a signaling channel, media flows over a peer
//! transport, and every participant's stream can be recorded into
//! segments that are exported when the local user leaves.
//!
//! The transports, the view, the camera and the capture encoder are
//! external; this crate only consumes them through the traits in
//! [`transport`], [`view`], [`media`] and [`recorder`].
//!
//! # Example
//! ```no_run
//! use room_recorder::{SessionConfig, SessionController, SessionDeps};
//!
//! # async fn example(deps: SessionDeps) -> room_recorder::error::Result<()> {
//! let config = SessionConfig::new("standup");
//! let mut session = SessionController::initialize(config, deps).await?;
//!
//! // Handles signaling, peer and view events until leave is pressed
//! session.run().await;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod media;
pub mod recorder;
pub mod registry;
pub mod session;
pub mod transport;
pub mod view;

pub use error::{Error, RecorderError, Result, SessionError};
pub use media::{CameraProvider, MediaStream};
pub use recorder::{RecorderConfig, RecorderSession, RecorderState};
pub use registry::ParticipantId;
pub use session::{EventSink, SessionConfig, SessionController, SessionDeps, SessionEvent};
