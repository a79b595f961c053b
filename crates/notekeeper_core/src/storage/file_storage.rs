//! JSON file-backed note storage.
//!
//! # Responsibility
//! - Own the on-disk notes file, the source of truth across restarts.
//! - Provide read-modify-write helpers (upsert, update, delete by id).
//!
//! # Invariants
//! - The notes file always holds a complete JSON array of notes.
//! - Writes go to a temp file in the notes file's own directory that is
//!   renamed over the target, so a crash mid-write leaves the previous file
//!   intact.
//! - Public `bool`/`Vec` helpers never propagate errors; they log and report.
//! - Read-modify-write helpers never write when the initial read failed.

use super::{NoteStore, StorageError, StorageResult};
use crate::config::StorageConfig;
use crate::model::note::{Note, NoteId};
use log::{error, info, warn};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// Notes file store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    data_dir: PathBuf,
    notes_path: PathBuf,
}

impl FileStorage {
    /// Prepares the data directory and notes file.
    ///
    /// # Side effects
    /// - Creates `data_dir` (recursively) when missing.
    /// - Writes an empty JSON array when the notes file is missing.
    ///
    /// # Errors
    /// - `StorageError::Init` when either step fails. Callers must treat
    ///   this as fatal: there is no usable storage.
    pub fn initialize(config: &StorageConfig) -> StorageResult<Self> {
        let storage = Self {
            data_dir: config.data_dir.clone(),
            notes_path: config.notes_path(),
        };

        if !storage.data_dir.exists() {
            fs::create_dir_all(&storage.data_dir).map_err(|source| {
                error!(
                    "event=storage_init module=storage status=error error_code=dir_create_failed path={} error={}",
                    storage.data_dir.display(),
                    source
                );
                StorageError::Init {
                    path: storage.data_dir.clone(),
                    source,
                }
            })?;
            info!(
                "event=storage_init module=storage status=ok action=dir_created path={}",
                storage.data_dir.display()
            );
        }

        let notes_dir = storage.notes_dir().to_path_buf();
        if !notes_dir.exists() {
            fs::create_dir_all(&notes_dir).map_err(|source| {
                error!(
                    "event=storage_init module=storage status=error error_code=dir_create_failed path={} error={}",
                    notes_dir.display(),
                    source
                );
                StorageError::Init {
                    path: notes_dir.clone(),
                    source,
                }
            })?;
        }

        if !storage.notes_path.exists() {
            storage.write_all(&[]).map_err(|err| {
                error!(
                    "event=storage_init module=storage status=error error_code=file_create_failed path={} error={}",
                    storage.notes_path.display(),
                    err
                );
                into_init_error(err, &storage.notes_path)
            })?;
            info!(
                "event=storage_init module=storage status=ok action=file_created path={}",
                storage.notes_path.display()
            );
        }

        Ok(storage)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn notes_path(&self) -> &Path {
        &self.notes_path
    }

    /// Directory that directly contains the notes file.
    ///
    /// Differs from `data_dir` when the configured file name has subdirectories.
    fn notes_dir(&self) -> &Path {
        self.notes_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or(&self.data_dir)
    }

    /// Loads every persisted note.
    ///
    /// Missing or zero-length files yield an empty collection. Read and parse
    /// failures are logged and also yield an empty collection.
    pub fn load_notes(&self) -> Vec<Note> {
        match self.read_all() {
            Ok(notes) => notes,
            Err(err) => {
                error!(
                    "event=notes_load module=storage status=error path={} error={}",
                    self.notes_path.display(),
                    err
                );
                Vec::new()
            }
        }
    }

    /// Overwrites the notes file with `notes`. Returns `false` on failure.
    pub fn save_notes(&self, notes: &[Note]) -> bool {
        self.report_write(self.write_all(notes))
    }

    /// Inserts `note`, or replaces the persisted note with the same id.
    pub fn save_note(&self, note: &Note) -> bool {
        let Some(mut notes) = self.read_for_update("note_save") else {
            return false;
        };
        match notes.iter_mut().find(|existing| existing.id() == note.id()) {
            Some(existing) => *existing = note.clone(),
            None => notes.push(note.clone()),
        }
        self.save_notes(&notes)
    }

    pub fn find_note_by_id(&self, id: NoteId) -> Option<Note> {
        self.load_notes().into_iter().find(|note| note.id() == id)
    }

    /// Replaces the persisted note with the same id.
    ///
    /// Returns `false` without writing when no such note exists.
    pub fn update_note(&self, note: &Note) -> bool {
        let Some(mut notes) = self.read_for_update("note_update") else {
            return false;
        };
        let Some(existing) = notes.iter_mut().find(|existing| existing.id() == note.id()) else {
            warn!(
                "event=note_update module=storage status=not_found note_id={}",
                note.id()
            );
            return false;
        };
        *existing = note.clone();
        self.save_notes(&notes)
    }

    /// Removes the persisted note with `id`.
    ///
    /// Returns `false` without writing when no such note exists.
    pub fn delete_note(&self, id: NoteId) -> bool {
        let Some(mut notes) = self.read_for_update("note_delete") else {
            return false;
        };
        let Some(index) = notes.iter().position(|note| note.id() == id) else {
            warn!("event=note_delete module=storage status=not_found note_id={id}");
            return false;
        };
        notes.remove(index);
        self.save_notes(&notes)
    }

    fn read_all(&self) -> StorageResult<Vec<Note>> {
        let started_at = Instant::now();
        if !self.notes_path.exists() {
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.notes_path).map_err(|source| StorageError::Io {
            path: self.notes_path.clone(),
            source,
        })?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let notes: Vec<Note> =
            serde_json::from_str(&raw).map_err(|source| StorageError::Parse {
                path: self.notes_path.clone(),
                source,
            })?;
        info!(
            "event=notes_load module=storage status=ok count={} duration_ms={}",
            notes.len(),
            started_at.elapsed().as_millis()
        );
        Ok(notes)
    }

    fn write_all(&self, notes: &[Note]) -> StorageResult<()> {
        let started_at = Instant::now();
        let encoded = serde_json::to_vec_pretty(notes).map_err(StorageError::Serialize)?;

        let io_error = |source: std::io::Error| StorageError::Io {
            path: self.notes_path.clone(),
            source,
        };
        let mut temp = NamedTempFile::new_in(self.notes_dir()).map_err(io_error)?;
        temp.write_all(&encoded).map_err(io_error)?;
        temp.as_file().sync_all().map_err(io_error)?;
        temp.persist(&self.notes_path)
            .map_err(|err| io_error(err.error))?;

        info!(
            "event=notes_save module=storage status=ok count={} duration_ms={}",
            notes.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn read_for_update(&self, event: &str) -> Option<Vec<Note>> {
        match self.read_all() {
            Ok(notes) => Some(notes),
            Err(err) => {
                error!(
                    "event={event} module=storage status=error error_code=read_failed path={} error={}",
                    self.notes_path.display(),
                    err
                );
                None
            }
        }
    }

    fn report_write(&self, result: StorageResult<()>) -> bool {
        match result {
            Ok(()) => true,
            Err(err) => {
                error!(
                    "event=notes_save module=storage status=error path={} error={}",
                    self.notes_path.display(),
                    err
                );
                false
            }
        }
    }
}

impl NoteStore for FileStorage {
    fn load_all(&self) -> StorageResult<Vec<Note>> {
        self.read_all()
    }

    fn save_all(&self, notes: &[Note]) -> StorageResult<()> {
        self.write_all(notes)
    }
}

fn into_init_error(err: StorageError, path: &Path) -> StorageError {
    match err {
        StorageError::Io { path, source } => StorageError::Init { path, source },
        other => StorageError::Init {
            path: path.to_path_buf(),
            source: std::io::Error::other(other.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::FileStorage;
    use crate::config::StorageConfig;
    use crate::model::note::Note;
    use std::fs;

    #[test]
    fn initialize_creates_directory_and_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig::new(dir.path().join("nested").join("data"));

        let storage = FileStorage::initialize(&config).unwrap();

        assert!(storage.data_dir().is_dir());
        let raw = fs::read_to_string(storage.notes_path()).unwrap();
        assert_eq!(raw.trim(), "[]");
    }

    #[test]
    fn initialize_keeps_existing_notes_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig::new(dir.path());
        let storage = FileStorage::initialize(&config).unwrap();
        assert!(storage.save_notes(&[Note::new("kept", "").unwrap()]));

        let reopened = FileStorage::initialize(&config).unwrap();
        assert_eq!(reopened.load_notes().len(), 1);
    }

    #[test]
    fn initialize_fails_when_data_dir_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();

        let err = FileStorage::initialize(&StorageConfig::new(blocker.join("data"))).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn nested_file_name_gets_its_directory_and_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig::new(dir.path()).with_file_name("sub/notes.json");

        let storage = FileStorage::initialize(&config).unwrap();
        assert_eq!(storage.notes_path(), dir.path().join("sub").join("notes.json"));
        assert!(storage.save_notes(&[Note::new("nested", "").unwrap()]));
        assert_eq!(storage.load_notes().len(), 1);

        let nested: Vec<_> = fs::read_dir(dir.path().join("sub")).unwrap().collect();
        assert_eq!(nested.len(), 1);
        let top: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(top.len(), 1);
    }

    #[test]
    fn write_leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::initialize(&StorageConfig::new(dir.path())).unwrap();

        assert!(storage.save_notes(&[Note::new("one", "").unwrap()]));
        assert!(storage.save_notes(&[Note::new("two", "").unwrap()]));

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
