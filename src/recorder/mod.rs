//! Per-participant recording
//!
//! A `RecorderSession` captures one participant's stream into a sequence
//! of completed segments:
//!
//! ```text
//!   start_recording()            stop_recording()
//!  Idle ─────────────► Recording ─────────────────► Idle ──► ...
//!                        │  chunks                    │
//!                        ▼                            ▼
//!                   [current buffer] ── drain ──► segments[n]
//! ```
//!
//! Chunks are delivered by an external `MediaCapture` backend over a
//! channel. On stop the recorder waits, bounded by the drain timeout, for
//! the backend to close that channel before sealing the segment.

pub mod capture;
pub mod config;
pub mod export;
pub mod session;
pub mod state;

pub use capture::{CaptureFeed, CaptureHandle, MediaCapture};
pub use config::RecorderConfig;
pub use export::{ArtifactStore, ExportArtifact};
pub use session::RecorderSession;
pub use state::{RecorderState, RecordingId, Segment};
