//! Note store contracts and implementations.
//!
//! # Responsibility
//! - Define the whole-collection persistence contract used by the workflow.
//! - Keep file format and I/O details out of service orchestration.
//!
//! # Invariants
//! - `read_all` treats an uninitialized store as an empty collection.
//! - `write_all` replaces the persisted collection wholesale; there is no
//!   partial update, lookup by id, or deletion.

use crate::model::note::Note;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

pub mod json_file;
pub mod memory;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of the durable medium behind a note store.
#[derive(Debug)]
pub enum StoreError {
    /// The backing resource could not be read or written.
    Io { path: PathBuf, source: io::Error },
    /// The backing resource exists but does not hold a note collection.
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The collection could not be encoded for writing.
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "note store I/O failed at `{}`: {source}", path.display())
            }
            Self::Corrupt { path, source } => write!(
                f,
                "note store at `{}` holds invalid data: {source}",
                path.display()
            ),
            Self::Encode { path, source } => write!(
                f,
                "failed to encode notes for `{}`: {source}",
                path.display()
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Corrupt { source, .. } | Self::Encode { source, .. } => Some(source),
        }
    }
}

/// Whole-collection persistence for notes.
pub trait NoteStore {
    /// Returns the persisted collection in insertion order, or an empty
    /// collection when nothing has been written yet.
    fn read_all(&self) -> StoreResult<Vec<Note>>;
    /// Replaces the persisted collection with `notes`.
    fn write_all(&self, notes: &[Note]) -> StoreResult<()>;
}

#[cfg(test)]
mod tests {
    use super::StoreError;
    use std::path::PathBuf;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<u32>("not a number").unwrap_err()
    }

    #[test]
    fn encode_failure_does_not_blame_the_file_contents() {
        let err = StoreError::Encode {
            path: PathBuf::from("notes.json"),
            source: json_error(),
        };
        let message = err.to_string();
        assert!(message.starts_with("failed to encode notes for `notes.json`"));
        assert!(!message.contains("invalid data"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn corrupt_document_names_the_file() {
        let err = StoreError::Corrupt {
            path: PathBuf::from("notes.json"),
            source: json_error(),
        };
        assert!(err.to_string().contains("`notes.json` holds invalid data"));
    }
}
