//! Media primitives
//!
//! This module provides:
//! - Shared stream handles and the camera provider seam
//! - Encoding profile negotiation
//! - Chunk concatenation into playable containers

pub mod blob;
pub mod profile;
pub mod stream;

pub use blob::MediaBlob;
pub use profile::{EncodingProfile, ProfilePreferences};
pub use stream::{CameraProvider, MediaStream};
