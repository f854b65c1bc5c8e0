//! File-backed cache mirror tests
//!
//! Exercises the mirror the way a restarted client sees it: a new store
//! instance over the same directory.

use chorus_cache::{index_key, playlist_key, CacheMirror, FileStore, KeyValueStore};
use chorus_core::{JournalId, PlaylistEntry};
use std::sync::Arc;
use tempfile::TempDir;

fn journal(id: &str) -> JournalId {
    JournalId::parse(id).unwrap()
}

fn mirror_at(dir: &TempDir) -> (CacheMirror, Arc<FileStore>) {
    let store = Arc::new(FileStore::open(dir.path()).unwrap());
    let shared: Arc<dyn KeyValueStore> = store.clone();
    (CacheMirror::new(shared), store)
}

fn playlist() -> Vec<PlaylistEntry> {
    vec![
        PlaylistEntry::with_id("a", "https://example.com/a.mp3", "A"),
        PlaylistEntry::with_id("b", "https://youtu.be/ABC123", "B"),
    ]
}

#[test]
fn test_state_survives_restart() {
    let dir = TempDir::new().unwrap();
    let vol1 = journal("demo-journal-vol1");

    {
        let (mirror, _) = mirror_at(&dir);
        mirror.save(&vol1, &playlist(), 1);
    }

    let (mirror, _) = mirror_at(&dir);
    let cached = mirror.load(&vol1);
    assert_eq!(cached.playlist, Some(playlist()));
    assert_eq!(cached.current_track_index, Some(1));
}

#[test]
fn test_journals_are_isolated() {
    let dir = TempDir::new().unwrap();
    let (mirror, _) = mirror_at(&dir);

    mirror.save(&journal("vol1"), &playlist(), 1);

    let other = mirror.load(&journal("vol2"));
    assert!(other.playlist.is_none());
    assert!(other.current_track_index.is_none());
}

#[test]
fn test_corrupt_files_read_as_absent() {
    let dir = TempDir::new().unwrap();
    let (mirror, store) = mirror_at(&dir);
    let vol1 = journal("vol1");

    store.set(&playlist_key(&vol1), "{ not a playlist").unwrap();
    store.set(&index_key(&vol1), "-3").unwrap();

    let cached = mirror.load(&vol1);
    assert!(cached.playlist.is_none());
    assert!(cached.current_track_index.is_none());
}

#[test]
fn test_empty_playlist_reads_as_absent() {
    let dir = TempDir::new().unwrap();
    let (mirror, _) = mirror_at(&dir);
    let vol1 = journal("vol1");

    mirror.save(&vol1, &[], 0);

    let cached = mirror.load(&vol1);
    assert!(cached.playlist.is_none());
    assert_eq!(cached.current_track_index, Some(0));
}

#[test]
fn test_keys_use_journal_id() {
    let vol1 = journal("demo-journal-vol1");
    assert_eq!(playlist_key(&vol1), "music_playlist_demo-journal-vol1");
    assert_eq!(index_key(&vol1), "music_current_demo-journal-vol1");
}
