//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical `{ id, title, content }` record.
//! - Turn raw submitted form fields into a typed draft.
//! - Validate drafts before they reach persistence.
//!
//! # Invariants
//! - `id` is an ISO-8601 UTC timestamp with millisecond precision.
//! - A draft's trimmed title has at least `TITLE_MIN_CHARS` characters before
//!   it can become a `Note`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Minimum number of characters in a trimmed title.
pub const TITLE_MIN_CHARS: usize = 5;

/// Form field carrying the note title.
pub const TITLE_FIELD: &str = "title";

/// Form field carrying the note body.
pub const CONTENT_FIELD: &str = "content";

/// Stable identifier of a persisted note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = String;

/// Persisted note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Creation instant rendered as ISO-8601 (`2024-05-01T09:30:00.000Z`).
    pub id: NoteId,
    /// Title as submitted (untrimmed).
    pub title: String,
    /// Free-form body. Older records may lack it.
    #[serde(default)]
    pub content: String,
}

/// Validation failure for a submitted note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Trimmed title is shorter than the minimum.
    TitleTooShort {
        min_chars: usize,
        actual_chars: usize,
    },
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TitleTooShort { min_chars, .. } => write!(
                f,
                "Invalid title - must be at least {min_chars} characters long."
            ),
        }
    }
}

impl Error for NoteValidationError {}

/// Typed view of one note submission, prior to identity assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    /// Creates a draft from explicit title and content values.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Builds a draft from raw submitted form fields.
    ///
    /// Returns the draft plus the names of submitted fields that were not
    /// accepted, sorted for stable diagnostics. A missing `title` or
    /// `content` field becomes an empty string.
    pub fn from_form_fields(fields: &HashMap<String, String>) -> (Self, Vec<String>) {
        let draft = Self {
            title: fields.get(TITLE_FIELD).cloned().unwrap_or_default(),
            content: fields.get(CONTENT_FIELD).cloned().unwrap_or_default(),
        };

        let mut ignored = fields
            .keys()
            .filter(|name| name.as_str() != TITLE_FIELD && name.as_str() != CONTENT_FIELD)
            .cloned()
            .collect::<Vec<_>>();
        ignored.sort();

        (draft, ignored)
    }

    /// Checks the title rule.
    ///
    /// # Errors
    /// - `TitleTooShort` when the trimmed title has fewer than
    ///   `TITLE_MIN_CHARS` characters.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        let actual_chars = self.title.trim().chars().count();
        if actual_chars < TITLE_MIN_CHARS {
            return Err(NoteValidationError::TitleTooShort {
                min_chars: TITLE_MIN_CHARS,
                actual_chars,
            });
        }
        Ok(())
    }

    /// Converts a validated draft into a note with the given identity.
    pub fn into_note(self, id: NoteId) -> Note {
        Note {
            id,
            title: self.title,
            content: self.content,
        }
    }
}

/// Renders a creation instant as a note id.
pub fn note_id_from_instant(instant: DateTime<Utc>) -> NoteId {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
