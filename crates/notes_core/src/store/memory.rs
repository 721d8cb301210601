//! In-memory note store for tests and embedding.
//!
//! Failure switches let callers exercise storage-error paths without
//! touching the file system.

use super::{NoteStore, StoreError, StoreResult};
use crate::model::note::Note;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

const MEMORY_STORE_PATH: &str = ":memory:";

/// Note store holding the collection in process memory.
#[derive(Debug, Default)]
pub struct InMemoryNoteStore {
    notes: Mutex<Vec<Note>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl InMemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `notes`.
    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            notes: Mutex::new(notes),
            ..Self::default()
        }
    }

    /// Makes every subsequent `read_all` fail (or succeed again).
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent `write_all` fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful `write_all` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Returns a copy of the current collection without going through the
    /// failure switches.
    pub fn snapshot(&self) -> Vec<Note> {
        self.notes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl NoteStore for InMemoryNoteStore {
    fn read_all(&self) -> StoreResult<Vec<Note>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(unavailable("read failure injected"));
        }
        Ok(self.snapshot())
    }

    fn write_all(&self, notes: &[Note]) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(unavailable("write failure injected"));
        }
        let mut guard = self.notes.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = notes.to_vec();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn unavailable(reason: &str) -> StoreError {
    StoreError::Io {
        path: PathBuf::from(MEMORY_STORE_PATH),
        source: io::Error::new(io::ErrorKind::PermissionDenied, reason),
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryNoteStore;
    use crate::model::note::Note;
    use crate::store::NoteStore;

    fn note(id: &str) -> Note {
        Note {
            id: id.to_string(),
            title: format!("title {id}"),
            content: String::new(),
        }
    }

    #[test]
    fn failure_switches_toggle_and_leave_data_intact() {
        let store = InMemoryNoteStore::with_notes(vec![note("a")]);

        store.set_fail_writes(true);
        assert!(store.write_all(&[]).is_err());
        assert_eq!(store.snapshot(), vec![note("a")]);
        assert_eq!(store.write_count(), 0);

        store.set_fail_writes(false);
        store.write_all(&[note("b")]).unwrap();
        assert_eq!(store.write_count(), 1);

        store.set_fail_reads(true);
        assert!(store.read_all().is_err());
        store.set_fail_reads(false);
        assert_eq!(store.read_all().unwrap(), vec![note("b")]);
    }
}
