//! Participant and recorder registries
//!
//! Both registries are owned exclusively by the `SessionController` and
//! mutated only from its event handlers, one event at a time.
//!
//! ```text
//!                    SessionController
//!            ┌──────────────┴──────────────┐
//!            ▼                             ▼
//!   ParticipantRegistry             RecordingRegistry
//!   id -> { call, stream }          id -> RecorderSession
//!   (local + remote)                (local + remote)
//! ```

pub mod entry;
pub mod key;
pub mod participants;
pub mod recordings;

pub use entry::ParticipantEntry;
pub use key::ParticipantId;
pub use participants::ParticipantRegistry;
pub use recordings::RecordingRegistry;
