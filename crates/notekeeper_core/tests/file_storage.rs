use notekeeper_core::{FileStorage, Note, NoteId, StorageConfig};
use std::fs;

fn open_storage() -> (tempfile::TempDir, FileStorage) {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig::new(dir.path()).with_file_name("test_notes.json");
    let storage = FileStorage::initialize(&config).unwrap();
    (dir, storage)
}

#[test]
fn save_note_creates_file_content() {
    let (_dir, storage) = open_storage();
    let note = Note::new("Test Title", "Test Content").unwrap();

    assert!(storage.save_note(&note));
    assert!(storage.notes_path().exists());
    assert_eq!(storage.load_notes(), vec![note]);
}

#[test]
fn save_note_twice_loads_both_notes() {
    let (_dir, storage) = open_storage();
    storage.save_note(&Note::new("Title 1", "Content 1").unwrap());
    storage.save_note(&Note::new("Title 2", "Content 2").unwrap());

    let notes = storage.load_notes();
    assert_eq!(notes.len(), 2);
    assert!(notes.iter().any(|note| note.title() == "Title 1"));
    assert!(notes.iter().any(|note| note.title() == "Title 2"));
}

#[test]
fn save_note_upserts_by_id() {
    let (_dir, storage) = open_storage();
    let mut note = Note::new("Original", "body").unwrap();
    storage.save_note(&note);

    note.set_title("Renamed").unwrap();
    assert!(storage.save_note(&note));

    let notes = storage.load_notes();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title(), "Renamed");
    assert_eq!(notes[0].content(), "body");
}

#[test]
fn freshly_initialized_storage_loads_empty() {
    let (_dir, storage) = open_storage();
    assert!(storage.load_notes().is_empty());
}

#[test]
fn zero_length_or_missing_file_loads_empty() {
    let (_dir, storage) = open_storage();
    fs::write(storage.notes_path(), b"").unwrap();
    assert!(storage.load_notes().is_empty());

    fs::remove_file(storage.notes_path()).unwrap();
    assert!(storage.load_notes().is_empty());
}

#[test]
fn corrupted_file_loads_empty() {
    let (_dir, storage) = open_storage();
    fs::write(storage.notes_path(), b"{ not json").unwrap();
    assert!(storage.load_notes().is_empty());
}

#[test]
fn read_modify_write_refuses_to_overwrite_corrupted_file() {
    let (_dir, storage) = open_storage();
    fs::write(storage.notes_path(), b"{ not json").unwrap();

    assert!(!storage.save_note(&Note::new("new", "").unwrap()));
    assert_eq!(fs::read(storage.notes_path()).unwrap(), b"{ not json");
}

#[test]
fn save_then_load_round_trips_collections() {
    let (_dir, storage) = open_storage();

    assert!(storage.save_notes(&[]));
    assert!(storage.load_notes().is_empty());

    let mut pinned = Note::new("pinned", "with flags").unwrap();
    pinned.pin();
    pinned.set_category(Some("Ideas"));
    let notes = vec![Note::new("plain", "").unwrap(), pinned];
    assert!(storage.save_notes(&notes));
    assert_eq!(storage.load_notes(), notes);
}

#[test]
fn find_note_by_id_hits_and_misses() {
    let (_dir, storage) = open_storage();
    let note = Note::new("Test Title", "Test Content").unwrap();
    storage.save_note(&note);

    let found = storage.find_note_by_id(note.id()).unwrap();
    assert_eq!(found.title(), "Test Title");
    assert_eq!(found.content(), "Test Content");
    assert!(storage.find_note_by_id(NoteId::new()).is_none());
}

#[test]
fn update_note_replaces_existing_and_rejects_unknown() {
    let (_dir, storage) = open_storage();
    let mut note = Note::new("Original Title", "Original Content").unwrap();
    storage.save_note(&note);

    note.set_title("Updated Title").unwrap();
    note.set_content("Updated Content");
    assert!(storage.update_note(&note));

    let updated = storage.find_note_by_id(note.id()).unwrap();
    assert_eq!(updated.title(), "Updated Title");
    assert_eq!(updated.content(), "Updated Content");

    let stranger = Note::new("Non-existent", "Content").unwrap();
    assert!(!storage.update_note(&stranger));
    assert_eq!(storage.load_notes().len(), 1);
}

#[test]
fn delete_note_removes_existing_and_rejects_unknown() {
    let (_dir, storage) = open_storage();
    let note = Note::new("To Delete", "Content").unwrap();
    storage.save_note(&note);

    assert!(storage.delete_note(note.id()));
    assert!(storage.find_note_by_id(note.id()).is_none());
    assert!(!storage.delete_note(note.id()));
}

#[test]
fn persisted_file_is_a_pretty_json_array() {
    let (_dir, storage) = open_storage();
    storage.save_note(&Note::new("Shape", "check").unwrap());

    let raw = fs::read_to_string(storage.notes_path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 1);
    for key in ["id", "title", "content", "createdAt", "updatedAt", "pinned", "archived"] {
        assert!(items[0].get(key).is_some(), "missing key {key}");
    }
    assert!(raw.contains('\n'));
}
