//! Error types
//!
//! Session-level failures are fatal to the whole session, recorder failures
//! are local to a single recording attempt.

use thiserror::Error;

/// Result alias using the crate error type
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    #[error("recorder error: {0}")]
    Recorder(#[from] RecorderError),
}

/// Failures that abort session setup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The camera provider could not deliver a local stream
    #[error("local stream acquisition failed: {0}")]
    StreamAcquisition(String),

    /// The signaling channel could not be built
    #[error("signaling channel unavailable: {0}")]
    Signaling(String),

    /// The peer transport could not be built or refused a call
    #[error("peer transport failure: {0}")]
    Transport(String),
}

/// Failures of a single recording attempt
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecorderError {
    /// None of the preferred encoding profiles is supported
    #[error("none of the encoding profiles are supported: {}", .candidates.join(", "))]
    NoSupportedProfile { candidates: Vec<String> },

    /// The capture backend refused to start
    #[error("capture failed to start: {0}")]
    CaptureFailed(String),
}
