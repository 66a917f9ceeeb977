//! Room session orchestration
//!
//! The `SessionController` owns the local stream, both registries and the
//! record-enabled flag. It is the only place where session state changes.
//!
//! ```text
//!  SignalingChannel ──┐
//!  PeerTransport ─────┼──► EventSink ──► SessionController::run()
//!  ViewPort controls ─┘                     │
//!                           ┌───────────────┼──────────────────┐
//!                           ▼               ▼                  ▼
//!                 ParticipantRegistry  RecordingRegistry    ViewPort
//!                                          │
//!                                          ▼
//!                                   RecorderSession × N
//! ```

pub mod config;
pub mod controller;
pub mod event;

pub use config::SessionConfig;
pub use controller::{SessionController, SessionDeps};
pub use event::{EventSink, SessionEvent};
