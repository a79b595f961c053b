//! Substring query over note title and content.
//!
//! # Responsibility
//! - Normalize user query text once per search call.
//! - Match notes by case-insensitive substring over title or content.
//!
//! # Invariants
//! - Blank or missing queries match every note.
//! - Matching never reorders its input.

use crate::model::note::Note;

/// Normalized search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteQuery {
    /// Matches every note.
    All,
    /// Trimmed, lowercased needle.
    Text(String),
}

impl NoteQuery {
    /// Builds a query from raw user input.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(text) if !text.is_empty() => Self::Text(text.to_lowercase()),
            _ => Self::All,
        }
    }

    pub fn matches(&self, note: &Note) -> bool {
        match self {
            Self::All => true,
            Self::Text(needle) => note.matches_lowercase(needle),
        }
    }

    /// Returns copies of matching notes in input order.
    pub fn filter<'a, I>(&self, notes: I) -> Vec<Note>
    where
        I: IntoIterator<Item = &'a Note>,
    {
        notes
            .into_iter()
            .filter(|note| self.matches(note))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::NoteQuery;
    use crate::model::note::Note;

    #[test]
    fn parse_treats_blank_and_missing_as_all() {
        assert_eq!(NoteQuery::parse(None), NoteQuery::All);
        assert_eq!(NoteQuery::parse(Some("")), NoteQuery::All);
        assert_eq!(NoteQuery::parse(Some("  \t")), NoteQuery::All);
        assert_eq!(
            NoteQuery::parse(Some("  MiXed ")),
            NoteQuery::Text("mixed".to_string())
        );
    }

    #[test]
    fn matches_title_or_content_ignoring_case() {
        let note = Note::new("Groceries", "Buy OAT milk").unwrap();

        assert!(NoteQuery::parse(Some("grocer")).matches(&note));
        assert!(NoteQuery::parse(Some("oat MILK")).matches(&note));
        assert!(!NoteQuery::parse(Some("bread")).matches(&note));
    }
}
