//! Core domain logic for NoteKeeper.
//! This crate owns the note collection and its JSON file persistence.

pub mod config;
pub mod logging;
pub mod manager;
pub mod model;
pub mod search;
pub mod storage;

pub use config::{AppConfig, StorageConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use manager::note_manager::{ManagerError, NoteManager};
pub use model::note::{Note, NoteId, NoteValidationError};
pub use search::query::NoteQuery;
pub use storage::file_storage::FileStorage;
pub use storage::memory::MemoryStore;
pub use storage::{NoteStore, StorageError, StorageResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
