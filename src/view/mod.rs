//! UI seam
//!
//! The view renders participant tiles and hosts the record and leave
//! controls. Controls report through the sink they were configured with.

use crate::media::MediaStream;
use crate::registry::ParticipantId;
use crate::session::EventSink;

/// What a tile shows
#[derive(Debug, Clone)]
pub enum TileSource {
    /// A live stream
    Stream(MediaStream),
    /// A playable recording reference
    Url(String),
}

/// Render request for one tile
#[derive(Debug, Clone)]
pub struct VideoTile {
    pub participant_id: ParticipantId,
    pub muted: bool,
    pub source: TileSource,
    /// Marks the local participant's own tile
    pub is_local: bool,
}

/// Host UI
pub trait ViewPort: Send {
    /// Record toggle reports `SessionEvent::RecordToggled`
    fn configure_record_button(&mut self, events: EventSink);

    /// Leave button reports `SessionEvent::LeavePressed`
    fn configure_leave_button(&mut self, events: EventSink);

    fn render_video(&mut self, tile: VideoTile);

    fn remove_video_element(&mut self, participant_id: &ParticipantId);

    fn set_participant_count(&mut self, count: usize);
}
