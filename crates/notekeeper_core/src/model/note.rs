//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record persisted to the notes file.
//! - Enforce title/timestamp invariants on every mutation path.
//!
//! # Invariants
//! - `title` is trimmed and never blank.
//! - `id` is a non-nil UUID and never reused for another note.
//! - `updated_at` is refreshed on every title or content change.
//! - Decoding runs the same validation as construction.

use chrono::{Local, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Stable note identifier, serialized as a hyphenated UUID string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(Uuid);

impl NoteId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses a hyphenated or simple UUID string.
    pub fn parse(value: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(value.trim()).map(Self)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for NoteId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for NoteId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation failures for note construction and mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Title is empty after trimming.
    BlankTitle,
    /// Caller-provided id is the nil UUID.
    NilId,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "note title cannot be null or empty"),
            Self::NilId => write!(f, "note id must not be nil"),
        }
    }
}

impl Error for NoteValidationError {}

/// Single user-authored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "NoteWire")]
pub struct Note {
    id: NoteId,
    title: String,
    content: String,
    category: Option<String>,
    pinned: bool,
    archived: bool,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl Note {
    /// Creates a note with a generated id; both timestamps are set to now.
    ///
    /// # Errors
    /// - `BlankTitle` when `title` is empty after trimming.
    pub fn new(
        title: impl AsRef<str>,
        content: impl AsRef<str>,
    ) -> Result<Self, NoteValidationError> {
        Self::with_id(NoteId::new(), title, content)
    }

    /// Creates a note with a caller-provided id.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(
        id: NoteId,
        title: impl AsRef<str>,
        content: impl AsRef<str>,
    ) -> Result<Self, NoteValidationError> {
        if id.is_nil() {
            return Err(NoteValidationError::NilId);
        }
        let title = normalize_title(title.as_ref())?;
        let now = now();
        Ok(Self {
            id,
            title,
            content: content.as_ref().trim().to_string(),
            category: None,
            pinned: false,
            archived: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces both timestamps, e.g. when importing notes from another store.
    ///
    /// An `updated_at` earlier than `created_at` is raised to `created_at`.
    pub fn with_timestamps(mut self, created_at: NaiveDateTime, updated_at: NaiveDateTime) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at.max(created_at);
        self
    }

    pub fn id(&self) -> NoteId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn is_archived(&self) -> bool {
        self.archived
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    /// Sets a new title and refreshes `updated_at`.
    ///
    /// A blank title is rejected and leaves the note untouched.
    pub fn set_title(&mut self, title: impl AsRef<str>) -> Result<(), NoteValidationError> {
        self.title = normalize_title(title.as_ref())?;
        self.touch();
        Ok(())
    }

    /// Sets new content and refreshes `updated_at`.
    pub fn set_content(&mut self, content: impl AsRef<str>) {
        self.content = content.as_ref().trim().to_string();
        self.touch();
    }

    /// Sets or clears the category label. Blank labels clear it.
    pub fn set_category(&mut self, category: Option<&str>) {
        self.category = category
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
    }

    pub fn pin(&mut self) {
        self.pinned = true;
    }

    pub fn unpin(&mut self) {
        self.pinned = false;
    }

    pub fn archive(&mut self) {
        self.archived = true;
    }

    pub fn unarchive(&mut self) {
        self.archived = false;
    }

    /// Checks the persisted-state invariants.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.id.is_nil() {
            return Err(NoteValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(NoteValidationError::BlankTitle);
        }
        Ok(())
    }

    /// Case-insensitive substring match against title or content.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.content.to_lowercase().contains(needle)
    }

    /// Whitespace-collapsed content preview, capped at `max_chars`.
    ///
    /// Returns `None` for empty content.
    pub fn summary(&self, max_chars: usize) -> Option<String> {
        let collapsed = WHITESPACE_RE.replace_all(&self.content, " ");
        let trimmed = collapsed.trim();
        if trimmed.is_empty() {
            return None;
        }
        let mut summary: String = trimmed.chars().take(max_chars).collect();
        if trimmed.chars().count() > max_chars {
            summary.push_str("...");
        }
        Some(summary)
    }

    fn touch(&mut self) {
        self.updated_at = now();
    }
}

fn normalize_title(title: &str) -> Result<String, NoteValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(NoteValidationError::BlankTitle);
    }
    Ok(trimmed.to_string())
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Decoding shape for persisted notes.
///
/// Accepts both timestamp naming schemes found in existing notes files and
/// tolerates files written without the category/flag fields.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NoteWire {
    id: NoteId,
    title: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    pinned: bool,
    #[serde(default)]
    archived: bool,
    #[serde(alias = "creationDate")]
    created_at: NaiveDateTime,
    #[serde(alias = "modificationDate", alias = "lastModified")]
    updated_at: NaiveDateTime,
}

impl TryFrom<NoteWire> for Note {
    type Error = NoteValidationError;

    fn try_from(wire: NoteWire) -> Result<Self, Self::Error> {
        let note = Self {
            id: wire.id,
            title: wire.title,
            content: wire.content.unwrap_or_default(),
            category: wire.category,
            pinned: wire.pinned,
            archived: wire.archived,
            created_at: wire.created_at,
            updated_at: wire.updated_at,
        };
        note.validate()?;
        Ok(note)
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteValidationError};
    use chrono::NaiveDate;

    #[test]
    fn set_title_rejects_blank_without_touching_note() {
        let mut note = Note::new("keep", "body").unwrap();
        let before = note.clone();

        let err = note.set_title("   ").unwrap_err();
        assert_eq!(err, NoteValidationError::BlankTitle);
        assert_eq!(note, before);
    }

    #[test]
    fn set_content_refreshes_updated_at() {
        let mut note = Note::new("title", "body").unwrap();
        let created = note.created_at();

        note.set_content("changed");
        assert_eq!(note.content(), "changed");
        assert_eq!(note.created_at(), created);
        assert!(note.updated_at() >= created);
    }

    #[test]
    fn with_timestamps_never_moves_modification_before_creation() {
        let created = NaiveDate::from_ymd_opt(2024, 5, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let earlier = created - chrono::Duration::days(3);
        let later = created + chrono::Duration::hours(1);

        let note = Note::new("title", "").unwrap().with_timestamps(created, earlier);
        assert_eq!(note.created_at(), created);
        assert_eq!(note.updated_at(), created);

        let note = note.with_timestamps(created, later);
        assert_eq!(note.updated_at(), later);
    }

    #[test]
    fn blank_category_clears_label() {
        let mut note = Note::new("title", "").unwrap();
        note.set_category(Some(" Work "));
        assert_eq!(note.category(), Some("Work"));

        note.set_category(Some("  "));
        assert_eq!(note.category(), None);
    }

    #[test]
    fn summary_collapses_whitespace_and_truncates() {
        let note = Note::new("title", "line one\n\n  line\ttwo").unwrap();
        assert_eq!(note.summary(100).as_deref(), Some("line one line two"));
        assert_eq!(note.summary(4).as_deref(), Some("line..."));

        let empty = Note::new("title", "   ").unwrap();
        assert_eq!(empty.summary(10), None);
    }
}
