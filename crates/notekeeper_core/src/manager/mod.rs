//! Note use-case layer.
//!
//! # Responsibility
//! - Orchestrate in-memory collection changes and store writes.
//! - Keep presentation code decoupled from storage details.

pub mod note_manager;
