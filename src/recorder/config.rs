//! Recorder configuration

use std::time::Duration;

use crate::media::ProfilePreferences;

/// Default bounded wait for in-flight chunks after a stop
pub const DEFAULT_DRAIN_TIMEOUT: Duration = Duration::from_millis(200);

/// Recorder configuration options
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Ordered encoding preferences
    pub preferences: ProfilePreferences,

    /// Upper bound on the wait for the capture's stop acknowledgment.
    /// Chunks arriving after it are dropped.
    pub drain_timeout: Duration,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            preferences: ProfilePreferences::default(),
            drain_timeout: DEFAULT_DRAIN_TIMEOUT,
        }
    }
}

impl RecorderConfig {
    /// Set the drain timeout
    pub fn drain_timeout(mut self, timeout: Duration) -> Self {
        self.drain_timeout = timeout;
        self
    }

    /// Replace the encoding preferences
    pub fn preferences(mut self, preferences: ProfilePreferences) -> Self {
        self.preferences = preferences;
        self
    }
}
