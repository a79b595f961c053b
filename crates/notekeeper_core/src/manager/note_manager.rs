//! Note collection manager.
//!
//! # Responsibility
//! - Own the in-memory note list the presentation layer works against.
//! - Provide create/read/update/delete/search/sort use-cases.
//! - Mirror every successful mutation to the backing store.
//!
//! # Invariants
//! - Collection order is insertion order until a sort call reorders it.
//! - Validation failures commit nothing, in memory or on disk.
//! - A failed store write keeps the in-memory change and marks the manager
//!   out of sync until the next successful write.
//! - When the initial load failed, mutations never write; only an explicit
//!   `sync()` may replace the unreadable store contents.

use crate::model::note::{Note, NoteId, NoteValidationError};
use crate::search::query::NoteQuery;
use crate::storage::memory::MemoryStore;
use crate::storage::NoteStore;
use log::{error, info, warn};
use std::cmp::Reverse;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Manager error for note use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagerError {
    /// Input rejected before any state changed.
    Validation(NoteValidationError),
}

impl Display for ManagerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ManagerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<NoteValidationError> for ManagerError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

/// In-memory note collection backed by a whole-collection store.
pub struct NoteManager<S: NoteStore> {
    notes: Vec<Note>,
    store: S,
    synced: bool,
    load_failed: bool,
}

impl NoteManager<MemoryStore> {
    /// Creates an empty manager that never touches disk.
    pub fn in_memory() -> Self {
        Self::load(MemoryStore::new())
    }
}

impl<S: NoteStore> NoteManager<S> {
    /// Seeds the collection from `store`.
    ///
    /// A failed read is logged and leaves the collection empty.
    pub fn load(store: S) -> Self {
        let (notes, synced) = match store.load_all() {
            Ok(notes) => (notes, true),
            Err(err) => {
                error!("event=manager_load module=manager status=error error={err}");
                (Vec::new(), false)
            }
        };
        info!(
            "event=manager_load module=manager status=ok count={}",
            notes.len()
        );
        Self {
            notes,
            store,
            synced,
            load_failed: !synced,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Whether the backing store holds the current collection.
    pub fn is_synced(&self) -> bool {
        self.synced
    }

    /// Whether the store could not be read when this manager was loaded.
    ///
    /// While set, mutations stay in memory and the store is left untouched.
    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    /// Rewrites the whole collection to the store.
    ///
    /// This is also the only write that replaces a store whose initial load
    /// failed. Returns the resulting sync state.
    pub fn sync(&mut self) -> bool {
        match self.store.save_all(&self.notes) {
            Ok(()) => {
                self.synced = true;
                self.load_failed = false;
            }
            Err(err) => {
                error!(
                    "event=manager_sync module=manager status=error count={} error={err}",
                    self.notes.len()
                );
                self.synced = false;
            }
        }
        self.synced
    }

    /// Creates and appends a note.
    ///
    /// # Errors
    /// - `ManagerError::Validation` when `title` is blank; nothing is added.
    pub fn create_note(
        &mut self,
        title: impl AsRef<str>,
        content: impl AsRef<str>,
    ) -> Result<Note, ManagerError> {
        let note = Note::new(title, content)?;
        self.notes.push(note.clone());
        info!(
            "event=note_create module=manager status=ok note_id={}",
            note.id()
        );
        self.persist();
        Ok(note)
    }

    /// Returns the first note with `id`.
    pub fn get_note_by_id(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id() == id)
    }

    /// Returns a copy of every note in collection order.
    pub fn get_all_notes(&self) -> Vec<Note> {
        self.notes.clone()
    }

    /// Replaces title and content of the note with `id`.
    ///
    /// Returns `Ok(false)` when no such note exists.
    ///
    /// # Errors
    /// - `ManagerError::Validation` when the note exists and `title` is
    ///   blank; nothing is changed.
    pub fn update_note(
        &mut self,
        id: NoteId,
        title: impl AsRef<str>,
        content: impl AsRef<str>,
    ) -> Result<bool, ManagerError> {
        let Some(note) = self.notes.iter_mut().find(|note| note.id() == id) else {
            warn!("event=note_update module=manager status=not_found note_id={id}");
            return Ok(false);
        };

        note.set_title(title)?;
        note.set_content(content);
        info!("event=note_update module=manager status=ok note_id={id}");
        self.persist();
        Ok(true)
    }

    /// Removes the first note with `id`. Returns `false` when absent.
    pub fn delete_note(&mut self, id: NoteId) -> bool {
        let Some(index) = self.notes.iter().position(|note| note.id() == id) else {
            warn!("event=note_delete module=manager status=not_found note_id={id}");
            return false;
        };
        self.notes.remove(index);
        info!("event=note_delete module=manager status=ok note_id={id}");
        self.persist();
        true
    }

    /// Returns notes whose title or content contains `query`, ignoring case.
    ///
    /// A missing or blank query returns every note.
    pub fn search_notes(&self, query: Option<&str>) -> Vec<Note> {
        NoteQuery::parse(query).filter(&self.notes)
    }

    /// Reorders the collection newest-created first.
    pub fn sort_by_creation_date(&mut self) {
        self.notes.sort_by_key(|note| Reverse(note.created_at()));
    }

    /// Reorders the collection most-recently-modified first.
    pub fn sort_by_modification_date(&mut self) {
        self.notes.sort_by_key(|note| Reverse(note.updated_at()));
    }

    /// Copy sorted newest-created first; the collection keeps its order.
    pub fn notes_by_creation_date(&self) -> Vec<Note> {
        let mut notes = self.notes.clone();
        notes.sort_by_key(|note| Reverse(note.created_at()));
        notes
    }

    /// Copy sorted most-recently-modified first; the collection keeps its order.
    pub fn notes_by_modification_date(&self) -> Vec<Note> {
        let mut notes = self.notes.clone();
        notes.sort_by_key(|note| Reverse(note.updated_at()));
        notes
    }

    /// Sets or clears the category of the note with `id`.
    pub fn set_category(&mut self, id: NoteId, category: Option<&str>) -> bool {
        self.mutate(id, "note_set_category", |note| note.set_category(category))
    }

    pub fn set_pinned(&mut self, id: NoteId, pinned: bool) -> bool {
        self.mutate(id, "note_set_pinned", |note| {
            if pinned {
                note.pin();
            } else {
                note.unpin();
            }
        })
    }

    pub fn set_archived(&mut self, id: NoteId, archived: bool) -> bool {
        self.mutate(id, "note_set_archived", |note| {
            if archived {
                note.archive();
            } else {
                note.unarchive();
            }
        })
    }

    /// Notes whose category equals `category`, ignoring case.
    pub fn notes_in_category(&self, category: &str) -> Vec<Note> {
        let wanted = category.trim().to_lowercase();
        self.notes
            .iter()
            .filter(|note| {
                note.category()
                    .is_some_and(|value| value.to_lowercase() == wanted)
            })
            .cloned()
            .collect()
    }

    pub fn pinned_notes(&self) -> Vec<Note> {
        self.notes
            .iter()
            .filter(|note| note.is_pinned())
            .cloned()
            .collect()
    }

    /// Non-archived notes, pinned first, otherwise in collection order.
    pub fn active_notes(&self) -> Vec<Note> {
        let mut notes: Vec<Note> = self
            .notes
            .iter()
            .filter(|note| !note.is_archived())
            .cloned()
            .collect();
        notes.sort_by_key(|note| !note.is_pinned());
        notes
    }

    fn persist(&mut self) {
        if self.load_failed {
            warn!(
                "event=manager_persist module=manager status=skipped reason=load_failed count={}",
                self.notes.len()
            );
            self.synced = false;
            return;
        }
        self.sync();
    }

    fn mutate<F>(&mut self, id: NoteId, event: &str, apply: F) -> bool
    where
        F: FnOnce(&mut Note),
    {
        let Some(note) = self.notes.iter_mut().find(|note| note.id() == id) else {
            warn!("event={event} module=manager status=not_found note_id={id}");
            return false;
        };
        apply(note);
        info!("event={event} module=manager status=ok note_id={id}");
        self.persist();
        true
    }
}
