//! In-memory note store for tests and throwaway sessions.

use super::{NoteStore, StorageResult};
use crate::model::note::Note;
use std::cell::RefCell;

/// Store that keeps the last saved collection in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    notes: RefCell<Vec<Note>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with `notes`.
    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            notes: RefCell::new(notes),
        }
    }

    /// Returns a copy of the last saved collection.
    pub fn snapshot(&self) -> Vec<Note> {
        self.notes.borrow().clone()
    }
}

impl NoteStore for MemoryStore {
    fn load_all(&self) -> StorageResult<Vec<Note>> {
        Ok(self.notes.borrow().clone())
    }

    fn save_all(&self, notes: &[Note]) -> StorageResult<()> {
        *self.notes.borrow_mut() = notes.to_vec();
        Ok(())
    }
}
