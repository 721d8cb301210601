//! Flat-file JSON note store.
//!
//! # Responsibility
//! - Persist the note collection as one JSON document on disk.
//! - Map file-system failures to `StoreError`.
//!
//! # Invariants
//! - Document shape is `{ "notes": [ { "id", "title", "content" } ] }`.
//! - A missing or blank file reads as an empty collection.
//! - Writes are staged in a sibling temp file and renamed over the target.
//! - Replacing an existing file keeps its permissions.

use super::{NoteStore, StoreError, StoreResult};
use crate::model::note::Note;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

#[derive(Debug, Default, Deserialize)]
struct NotesDocument {
    #[serde(default)]
    notes: Vec<Note>,
}

#[derive(Debug, Serialize)]
struct NotesDocumentRef<'a> {
    notes: &'a [Note],
}

/// Note store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileNoteStore {
    path: PathBuf,
}

impl JsonFileNoteStore {
    /// Creates a store for `path`. The file is not touched until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn replace_file(&self, payload: &[u8]) -> StoreResult<()> {
        let parent = self.parent_dir();
        fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;

        let mut staged = NamedTempFile::new_in(parent).map_err(|err| self.io_error(err))?;
        staged
            .write_all(payload)
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|err| self.io_error(err))?;
        // Staged files start at 0600; keep the mode of the file being replaced.
        if let Ok(existing) = fs::metadata(&self.path) {
            staged
                .as_file()
                .set_permissions(existing.permissions())
                .map_err(|err| self.io_error(err))?;
        }
        staged
            .persist(&self.path)
            .map_err(|err| self.io_error(err.error))?;
        Ok(())
    }
}

impl NoteStore for JsonFileNoteStore {
    fn read_all(&self) -> StoreResult<Vec<Note>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("event=store_read module=store status=ok state=uninitialized count=0");
                return Ok(Vec::new());
            }
            Err(err) => {
                error!(
                    "event=store_read module=store status=error error_code=io_failed error={}",
                    err
                );
                return Err(self.io_error(err));
            }
        };

        if raw.trim().is_empty() {
            info!("event=store_read module=store status=ok state=blank count=0");
            return Ok(Vec::new());
        }

        let document: NotesDocument = serde_json::from_str(&raw).map_err(|source| {
            error!(
                "event=store_read module=store status=error error_code=corrupt_document error={}",
                source
            );
            StoreError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;

        info!(
            "event=store_read module=store status=ok count={}",
            document.notes.len()
        );
        Ok(document.notes)
    }

    fn write_all(&self, notes: &[Note]) -> StoreResult<()> {
        let started_at = Instant::now();
        let payload = serde_json::to_vec(&NotesDocumentRef { notes }).map_err(|source| {
            StoreError::Encode {
                path: self.path.clone(),
                source,
            }
        })?;

        match self.replace_file(&payload) {
            Ok(()) => {
                info!(
                    "event=store_write module=store status=ok count={} bytes={} duration_ms={}",
                    notes.len(),
                    payload.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_write module=store status=error count={} duration_ms={} error_code=write_failed error={}",
                    notes.len(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}
