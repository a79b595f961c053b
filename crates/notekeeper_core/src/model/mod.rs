//! Domain model for notes.
//!
//! # Responsibility
//! - Define the note record shared by manager and storage layers.
//!
//! # Invariants
//! - Every note is identified by a stable, non-nil `NoteId`.
//! - Titles are never blank once a `Note` exists.

pub mod note;
