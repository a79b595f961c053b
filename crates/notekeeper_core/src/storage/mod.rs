//! Persistence layer for the note collection.
//!
//! # Responsibility
//! - Define the whole-collection store contract used by the manager.
//! - Keep file and serialization details out of manager logic.
//!
//! # Invariants
//! - Every write replaces the complete collection; there are no partial
//!   updates.
//! - Only `StorageError::Init` is fatal; callers treat the rest as
//!   recoverable.

use crate::model::note::Note;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod file_storage;
pub mod memory;

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage-layer error.
#[derive(Debug)]
pub enum StorageError {
    /// Data directory or notes file could not be created at startup.
    Init {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Read/write failure during normal operation.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Notes file content is not a valid note array.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Collection could not be encoded.
    Serialize(serde_json::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Init { path, source } => {
                write!(
                    f,
                    "cannot initialize note storage at `{}`: {source}",
                    path.display()
                )
            }
            Self::Io { path, source } => write!(f, "I/O error on `{}`: {source}", path.display()),
            Self::Parse { path, source } => {
                write!(f, "invalid notes file `{}`: {source}", path.display())
            }
            Self::Serialize(err) => write!(f, "failed to encode notes: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Init { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl StorageError {
    /// Whether the process cannot continue without usable storage.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Init { .. })
    }
}

/// Whole-collection backing store for `NoteManager`.
pub trait NoteStore {
    /// Reads the complete persisted collection.
    fn load_all(&self) -> StorageResult<Vec<Note>>;
    /// Replaces the complete persisted collection.
    fn save_all(&self, notes: &[Note]) -> StorageResult<()>;
}
