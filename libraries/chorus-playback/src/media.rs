//! Media URL classification
//!
//! Decides which backend plays a playlist entry. Video-hosting URLs go to
//! the embedded frame, everything else is handed to the native audio output.

use url::Url;

/// Backend selected for a playlist entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackTarget {
    /// Directly playable audio URL
    NativeAudio { url: String },

    /// Embedded video frame, addressed by its media id
    ///
    /// The id is empty when the URL looked like a video page but no id could
    /// be extracted; such targets produce no audible effect.
    EmbeddedFrame { video_id: String },
}

/// Which backend a target uses, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    NativeAudio,
    EmbeddedFrame,
}

impl PlaybackTarget {
    /// Classify a media URL
    pub fn for_url(url: &str) -> Self {
        if is_embedded_url(url) {
            Self::EmbeddedFrame {
                video_id: extract_video_id(url),
            }
        } else {
            Self::NativeAudio {
                url: url.to_string(),
            }
        }
    }

    pub fn kind(&self) -> TargetKind {
        match self {
            Self::NativeAudio { .. } => TargetKind::NativeAudio,
            Self::EmbeddedFrame { .. } => TargetKind::EmbeddedFrame,
        }
    }
}

/// Check whether a URL points at the embedded video service
pub fn is_embedded_url(url: &str) -> bool {
    parse_lenient(url)
        .and_then(|parsed| parsed.host_str().map(is_video_host))
        .unwrap_or(false)
}

/// Extract the normalized media id from a video URL
///
/// Supports watch URLs (`youtube.com/watch?v=<id>`), short URLs
/// (`youtu.be/<id>`), embed URLs (`youtube.com/embed/<id>`) and shorts
/// (`youtube.com/shorts/<id>`). Returns an empty string when nothing usable
/// is found.
pub fn extract_video_id(url: &str) -> String {
    let Some(parsed) = parse_lenient(url) else {
        return String::new();
    };
    let Some(host) = parsed.host_str() else {
        return String::new();
    };

    let candidate = if host.eq_ignore_ascii_case("youtu.be") {
        parsed
            .path_segments()
            .and_then(|mut segments| segments.next())
            .map(str::to_string)
    } else if is_video_host(host) {
        let mut segments = parsed.path_segments().into_iter().flatten();
        match segments.next() {
            Some("watch") => parsed
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned()),
            Some("embed" | "shorts" | "live") => segments.next().map(str::to_string),
            _ => None,
        }
    } else {
        None
    };

    candidate
        .filter(|id| is_valid_video_id(id))
        .unwrap_or_default()
}

fn is_video_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    host == "youtu.be" || host == "youtube.com" || host.ends_with(".youtube.com")
}

fn is_valid_video_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Parse a URL, retrying with an `https://` scheme for bare host paths
fn parse_lenient(url: &str) -> Option<Url> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return None;
    }

    Url::parse(trimmed)
        .ok()
        .filter(|parsed| parsed.has_host())
        .or_else(|| Url::parse(&format!("https://{trimmed}")).ok())
}
