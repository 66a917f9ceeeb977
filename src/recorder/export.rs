//! Export seam for finished segments

use crate::media::MediaBlob;

/// A downloadable file built from one segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// `id:<participant>-when:<epochMillis>.<ext>`
    pub file_name: String,
    pub blob: MediaBlob,
}

/// Host storage for playable references and saved artifacts
pub trait ArtifactStore: Send + Sync {
    /// Create a fresh reference URL for `blob`. Every call yields a new handle.
    fn create_object_url(&self, blob: &MediaBlob) -> String;

    /// Save an artifact immediately
    fn save(&self, artifact: ExportArtifact);
}
