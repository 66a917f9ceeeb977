//! Combined media containers

use bytes::{Bytes, BytesMut};

/// One playable container built from an ordered chunk sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaBlob {
    /// Container MIME type
    pub mime_type: String,
    /// Concatenated chunk data
    pub data: Bytes,
}

impl MediaBlob {
    /// Concatenate `chunks` in order into a single buffer
    pub fn from_chunks(chunks: &[Bytes], mime_type: impl Into<String>) -> Self {
        let total: usize = chunks.iter().map(Bytes::len).sum();
        let mut buf = BytesMut::with_capacity(total);
        for chunk in chunks {
            buf.extend_from_slice(chunk);
        }

        Self {
            mime_type: mime_type.into(),
            data: buf.freeze(),
        }
    }

    /// Size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the blob holds no data
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
