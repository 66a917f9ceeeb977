//! Session configuration

use crate::recorder::RecorderConfig;

/// Session configuration options
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Room announced on the signaling channel
    pub room_id: String,

    /// Settings applied to every recorder in the session
    pub recorder: RecorderConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            room_id: "default".into(),
            recorder: RecorderConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Create a config for `room_id` with default recorder settings
    pub fn new(room_id: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            ..Default::default()
        }
    }

    /// Set the room id
    pub fn room(mut self, room_id: impl Into<String>) -> Self {
        self.room_id = room_id.into();
        self
    }

    /// Set the recorder configuration
    pub fn recorder(mut self, recorder: RecorderConfig) -> Self {
        self.recorder = recorder;
        self
    }
}
