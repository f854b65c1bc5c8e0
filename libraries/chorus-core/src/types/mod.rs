mod entry;
mod ids;
mod playback_state;

pub use entry::PlaylistEntry;
pub use ids::JournalId;
pub use playback_state::{
    PlaybackState, PlaybackUpdate, RemoteDocument, DEFAULT_TRACK_TITLE, DEFAULT_TRACK_URL,
};
