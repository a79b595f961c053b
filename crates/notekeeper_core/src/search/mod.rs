//! Search module entry.
//!
//! # Responsibility
//! - Provide linear, case-insensitive keyword search over notes.
//! - Keep query normalization out of the manager.

pub mod query;
