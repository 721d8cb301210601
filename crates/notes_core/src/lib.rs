//! Core domain logic for the notes service.
//! This crate is the single source of truth for note invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use config::{ConfigError, NotesConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{Note, NoteDraft, NoteId, NoteValidationError, TITLE_MIN_CHARS};
pub use service::clock::{Clock, FixedClock, SystemClock};
pub use service::note_workflow::{
    CreateNoteOutcome, NoteWorkflow, NoteWorkflowError, NOTES_LIST_PATH, NOTES_NOT_FOUND_MESSAGE,
};
pub use store::json_file::JsonFileNoteStore;
pub use store::memory::InMemoryNoteStore;
pub use store::{NoteStore, StoreError, StoreResult};

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
