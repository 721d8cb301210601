//! Note list/create workflow.
//!
//! # Responsibility
//! - Serve listing requests from the store and signal an empty collection.
//! - Validate submissions, assign identity, append and persist.
//!
//! # Invariants
//! - A rejected submission never touches the store.
//! - New notes are appended at the end; existing order is preserved.
//! - Generated ids never collide with ids already in the collection.
//! - Read-append-write cycles of one workflow instance never interleave.

use crate::model::note::{note_id_from_instant, Note, NoteDraft, NoteId};
use crate::service::clock::{Clock, SystemClock};
use crate::store::{NoteStore, StoreError};
use chrono::{DateTime, TimeDelta, Utc};
use log::{debug, error, info};
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, PoisonError};

/// Message carried by the not-found signal of an empty listing.
pub const NOTES_NOT_FOUND_MESSAGE: &str = "Could not find any notes.";

/// Listing view that a successful create redirects to.
pub const NOTES_LIST_PATH: &str = "/notes";

/// Workflow error for note use-cases.
#[derive(Debug)]
pub enum NoteWorkflowError {
    /// Listing found no notes.
    NotFound { message: String },
    /// Persistence-layer failure; fatal for the current request.
    Storage(StoreError),
}

impl NoteWorkflowError {
    fn empty_collection() -> Self {
        Self::NotFound {
            message: NOTES_NOT_FOUND_MESSAGE.to_string(),
        }
    }

    /// HTTP-like status for outward envelopes.
    pub fn status_hint(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Storage(_) => 500,
        }
    }
}

impl Display for NoteWorkflowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { message } => write!(f, "{message}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteWorkflowError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<StoreError> for NoteWorkflowError {
    fn from(value: StoreError) -> Self {
        Self::Storage(value)
    }
}

/// Terminal outcome of a create request that did not hit a storage failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateNoteOutcome {
    /// Submission failed validation; nothing was persisted.
    Rejected { message: String },
    /// Note persisted; caller should send the client to `location`.
    Redirect { location: &'static str },
}

/// Note workflow over an injected store and clock.
pub struct NoteWorkflow<S: NoteStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    write_lock: Mutex<()>,
}

impl<S: NoteStore> NoteWorkflow<S, SystemClock> {
    /// Creates a workflow using wall-clock time for ids.
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: NoteStore, C: Clock> NoteWorkflow<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lists all notes in insertion order.
    ///
    /// # Errors
    /// - `NotFound` when the collection is empty.
    /// - `Storage` when the store cannot be read.
    pub fn list_notes(&self) -> Result<Vec<Note>, NoteWorkflowError> {
        let notes = self.store.read_all().map_err(|err| {
            error!("event=notes_list module=service status=error error={err}");
            NoteWorkflowError::from(err)
        })?;

        if notes.is_empty() {
            info!("event=notes_list module=service status=not_found count=0");
            return Err(NoteWorkflowError::empty_collection());
        }

        info!(
            "event=notes_list module=service status=ok count={}",
            notes.len()
        );
        Ok(notes)
    }

    /// Creates one note from raw submitted form fields.
    ///
    /// Only `title` and `content` are kept; other fields are dropped.
    pub fn create_note(
        &self,
        fields: &HashMap<String, String>,
    ) -> Result<CreateNoteOutcome, NoteWorkflowError> {
        let (draft, ignored) = NoteDraft::from_form_fields(fields);
        if !ignored.is_empty() {
            debug!(
                "event=note_create module=service ignored_fields={}",
                ignored.join(",")
            );
        }
        self.create_from_draft(draft)
    }

    /// Validates and persists one typed draft.
    ///
    /// # Errors
    /// - `Storage` when the collection cannot be read or written back.
    pub fn create_from_draft(
        &self,
        draft: NoteDraft,
    ) -> Result<CreateNoteOutcome, NoteWorkflowError> {
        if let Err(err) = draft.validate() {
            info!("event=note_create module=service status=rejected reason=title_too_short");
            return Ok(CreateNoteOutcome::Rejected {
                message: err.to_string(),
            });
        }

        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut notes = self.store.read_all()?;
        let id = unique_note_id(self.clock.now(), &notes);
        notes.push(draft.into_note(id));

        if let Err(err) = self.store.write_all(&notes) {
            error!("event=note_create module=service status=error error={err}");
            return Err(err.into());
        }

        info!(
            "event=note_create module=service status=ok count={}",
            notes.len()
        );
        Ok(CreateNoteOutcome::Redirect {
            location: NOTES_LIST_PATH,
        })
    }
}

/// Derives an id from `now`, stepping forward one millisecond at a time
/// until it is not already taken.
fn unique_note_id(now: DateTime<Utc>, existing: &[Note]) -> NoteId {
    let taken = existing
        .iter()
        .map(|note| note.id.as_str())
        .collect::<HashSet<_>>();

    let mut candidate = now;
    loop {
        let id = note_id_from_instant(candidate);
        if !taken.contains(id.as_str()) {
            return id;
        }
        candidate += TimeDelta::milliseconds(1);
    }
}
