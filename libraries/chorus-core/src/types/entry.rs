/// Playlist entry type
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One playable item in a journal playlist
///
/// Immutable once created. The `id` is unique within its playlist and stays
/// stable across syncs; playlist changes are whole-list replacements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    /// Opaque identifier
    pub id: String,

    /// Media URL (direct audio file or embedded-video page)
    pub url: String,

    /// Display title
    pub title: String,
}

impl PlaylistEntry {
    /// Create an entry with a freshly generated id
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            url: url.into(),
            title: title.into(),
        }
    }

    /// Create an entry with a known id
    pub fn with_id(id: impl Into<String>, url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            title: title.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = PlaylistEntry::new("https://example.com/a.mp3", "A");
        let b = PlaylistEntry::new("https://example.com/a.mp3", "A");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn wire_shape() {
        let entry = PlaylistEntry::with_id("1", "https://example.com/a.mp3", "A");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": "1", "url": "https://example.com/a.mp3", "title": "A" })
        );
    }
}
