//! Encoding profile negotiation
//!
//! Profiles are tried in preference order against a capability query. The
//! first supported one wins.

use crate::error::RecorderError;

/// A negotiated container/codec combination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingProfile {
    /// Full MIME type handed to the capture backend
    pub mime_type: String,
    /// Container MIME type without codec parameters
    pub container: String,
    /// File extension for exported artifacts
    pub extension: String,
}

/// Ordered list of codec suffixes for one container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePreferences {
    /// Container MIME type (e.g., "video/webm")
    pub container: String,
    /// File extension for the container
    pub extension: String,
    /// Codec parameter suffixes, most preferred first. Empty means container default.
    pub codecs: Vec<String>,
}

impl Default for ProfilePreferences {
    fn default() -> Self {
        Self {
            container: "video/webm".into(),
            extension: "webm".into(),
            codecs: vec!["codecs=vp9,opus".into(), "codecs=vp8,opus".into(), String::new()],
        }
    }
}

impl ProfilePreferences {
    /// Candidate MIME strings in preference order
    pub fn candidates(&self) -> Vec<String> {
        self.codecs
            .iter()
            .map(|codec| format!("{};{}", self.container, codec))
            .collect()
    }

    /// Pick the first candidate accepted by `is_supported`
    pub fn negotiate<F>(&self, is_supported: F) -> Result<EncodingProfile, RecorderError>
    where
        F: Fn(&str) -> bool,
    {
        let candidates = self.candidates();
        let selected = candidates
            .iter()
            .find(|mime| is_supported(mime.as_str()))
            .cloned();

        match selected {
            Some(mime_type) => Ok(EncodingProfile {
                mime_type,
                container: self.container.clone(),
                extension: self.extension.clone(),
            }),
            None => Err(RecorderError::NoSupportedProfile { candidates }),
        }
    }
}
