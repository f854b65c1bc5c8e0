//! Property-based tests for media URL classification

use chorus_playback::{extract_video_id, is_embedded_url, PlaybackTarget, TargetKind};
use proptest::prelude::*;

fn video_id() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]{6,11}"
}

proptest! {
    /// Property: short, watch and embed URLs all yield the same id
    #[test]
    fn all_url_shapes_yield_id(id in video_id(), t in 0u32..3600) {
        let short = format!("https://youtu.be/{id}?t={t}");
        let watch = format!("https://www.youtube.com/watch?v={id}&list=foo");
        let embed = format!("https://www.youtube.com/embed/{id}");

        for url in [short, watch, embed] {
            prop_assert!(is_embedded_url(&url), "{} not embedded", url);
            prop_assert_eq!(extract_video_id(&url), id.clone());
            prop_assert_eq!(
                PlaybackTarget::for_url(&url),
                PlaybackTarget::EmbeddedFrame { video_id: id.clone() }
            );
        }
    }

    /// Property: extraction never panics and only returns id characters
    #[test]
    fn extraction_output_is_clean(url in "\\PC{0,80}") {
        let id = extract_video_id(&url);
        prop_assert!(id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
    }

    /// Property: audio hosts are always native
    #[test]
    fn other_hosts_are_native(name in "[a-z]{1,12}", file in "[a-z0-9]{1,12}") {
        let url = format!("https://{name}.example.com/{file}.mp3");
        prop_assert!(!is_embedded_url(&url));
        prop_assert_eq!(PlaybackTarget::for_url(&url).kind(), TargetKind::NativeAudio);
    }
}
