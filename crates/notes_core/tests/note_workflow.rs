use chrono::{TimeZone, Utc};
use notes_core::{
    CreateNoteOutcome, FixedClock, InMemoryNoteStore, JsonFileNoteStore, Note, NoteDraft,
    NoteStore, NoteWorkflow, NoteWorkflowError, StoreError, NOTES_LIST_PATH,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

fn form(title: &str, content: &str) -> HashMap<String, String> {
    HashMap::from([
        ("title".to_string(), title.to_string()),
        ("content".to_string(), content.to_string()),
    ])
}

fn redirect() -> CreateNoteOutcome {
    CreateNoteOutcome::Redirect {
        location: NOTES_LIST_PATH,
    }
}

#[test]
fn list_on_empty_collection_signals_not_found() {
    let workflow = NoteWorkflow::new(InMemoryNoteStore::new());

    let err = workflow.list_notes().unwrap_err();
    match &err {
        NoteWorkflowError::NotFound { message } => {
            assert_eq!(message, "Could not find any notes.")
        }
        other => panic!("expected not found, got {other}"),
    }
    assert_eq!(err.status_hint(), 404);
}

#[test]
fn list_returns_collection_unchanged() {
    let existing = vec![
        Note {
            id: "2024-01-01T00:00:00.000Z".to_string(),
            title: "First note".to_string(),
            content: "a".to_string(),
        },
        Note {
            id: "2024-01-01T00:00:01.000Z".to_string(),
            title: "Second note".to_string(),
            content: "b".to_string(),
        },
    ];
    let workflow = NoteWorkflow::new(InMemoryNoteStore::with_notes(existing.clone()));

    assert_eq!(workflow.list_notes().unwrap(), existing);
}

#[test]
fn short_title_is_rejected_without_touching_store() {
    let workflow = NoteWorkflow::new(InMemoryNoteStore::new());

    let outcome = workflow.create_note(&form("Hi", "x")).unwrap();
    assert_eq!(
        outcome,
        CreateNoteOutcome::Rejected {
            message: "Invalid title - must be at least 5 characters long.".to_string()
        }
    );
    assert!(workflow.store().snapshot().is_empty());
    assert_eq!(workflow.store().write_count(), 0);
}

#[test]
fn create_persists_iff_trimmed_title_has_five_chars() {
    let cases = [
        ("", false),
        ("    ", false),
        ("abcd", false),
        ("  abcd  ", false),
        ("\tabcd\n", false),
        ("abcde", true),
        ("  abcde  ", true),
        ("a b c", true),
        ("Hello world", true),
    ];

    for (title, should_persist) in cases {
        let workflow = NoteWorkflow::new(InMemoryNoteStore::new());
        let outcome = workflow.create_note(&form(title, "body")).unwrap();
        let persisted = workflow.store().snapshot();

        if should_persist {
            assert_eq!(outcome, redirect(), "title {title:?}");
            assert_eq!(persisted.len(), 1, "title {title:?}");
            assert_eq!(persisted[0].title, title);
        } else {
            assert!(
                matches!(outcome, CreateNoteOutcome::Rejected { .. }),
                "title {title:?}"
            );
            assert!(persisted.is_empty(), "title {title:?}");
        }
    }
}

#[test]
fn create_on_empty_collection_appends_one_note_and_redirects() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let workflow = NoteWorkflow::with_clock(InMemoryNoteStore::new(), FixedClock(now));

    let outcome = workflow
        .create_note(&form("Hello world", "Body text"))
        .unwrap();
    assert_eq!(outcome, redirect());

    let notes = workflow.list_notes().unwrap();
    assert_eq!(
        notes,
        vec![Note {
            id: "2024-06-01T12:00:00.000Z".to_string(),
            title: "Hello world".to_string(),
            content: "Body text".to_string(),
        }]
    );
}

#[test]
fn sequential_creates_keep_submission_order() {
    let workflow = NoteWorkflow::new(InMemoryNoteStore::new());

    workflow.create_note(&form("First entry", "one")).unwrap();
    workflow.create_note(&form("Second entry", "two")).unwrap();

    let titles = workflow
        .list_notes()
        .unwrap()
        .into_iter()
        .map(|note| note.title)
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["First entry", "Second entry"]);
}

#[test]
fn ids_stay_unique_when_clock_does_not_advance() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let workflow = NoteWorkflow::with_clock(InMemoryNoteStore::new(), FixedClock(now));

    for idx in 0..3 {
        workflow
            .create_from_draft(NoteDraft::new(format!("Note number {idx}"), ""))
            .unwrap();
    }

    let ids = workflow
        .list_notes()
        .unwrap()
        .into_iter()
        .map(|note| note.id)
        .collect::<Vec<_>>();
    assert_eq!(
        ids,
        vec![
            "2024-06-01T12:00:00.000Z",
            "2024-06-01T12:00:00.001Z",
            "2024-06-01T12:00:00.002Z",
        ]
    );
}

#[test]
fn extra_submitted_fields_are_not_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let workflow = NoteWorkflow::new(JsonFileNoteStore::new(dir.path().join("notes.json")));

    let mut fields = form("Allow listed", "body");
    fields.insert("id".to_string(), "forged-id".to_string());
    fields.insert("admin".to_string(), "true".to_string());
    workflow.create_note(&fields).unwrap();

    let raw = std::fs::read_to_string(workflow.store().path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let stored = json["notes"][0].as_object().unwrap();
    let mut keys = stored.keys().cloned().collect::<Vec<_>>();
    keys.sort();
    assert_eq!(keys, vec!["content", "id", "title"]);
    assert_ne!(stored["id"], "forged-id");
}

#[test]
fn missing_title_field_is_a_validation_failure() {
    let workflow = NoteWorkflow::new(InMemoryNoteStore::new());
    let fields = HashMap::from([("content".to_string(), "orphan body".to_string())]);

    let outcome = workflow.create_note(&fields).unwrap();
    assert!(matches!(outcome, CreateNoteOutcome::Rejected { .. }));
}

#[test]
fn storage_failures_propagate_from_list_and_create() {
    let workflow = NoteWorkflow::new(InMemoryNoteStore::new());

    workflow.store().set_fail_reads(true);
    let list_err = workflow.list_notes().unwrap_err();
    assert!(matches!(
        list_err,
        NoteWorkflowError::Storage(StoreError::Io { .. })
    ));
    assert_eq!(list_err.status_hint(), 500);

    let create_err = workflow
        .create_note(&form("Valid title", "body"))
        .unwrap_err();
    assert!(matches!(create_err, NoteWorkflowError::Storage(_)));

    workflow.store().set_fail_reads(false);
    workflow.store().set_fail_writes(true);
    let write_err = workflow
        .create_note(&form("Valid title", "body"))
        .unwrap_err();
    assert!(matches!(write_err, NoteWorkflowError::Storage(_)));
    assert!(workflow.store().snapshot().is_empty());
}

#[test]
fn validation_runs_before_storage_is_consulted() {
    let workflow = NoteWorkflow::new(InMemoryNoteStore::new());
    workflow.store().set_fail_reads(true);

    let outcome = workflow.create_note(&form("tiny", "")).unwrap();
    assert!(matches!(outcome, CreateNoteOutcome::Rejected { .. }));
}

#[test]
fn concurrent_creates_on_one_workflow_do_not_lose_updates() {
    let workflow = Arc::new(NoteWorkflow::new(InMemoryNoteStore::new()));

    let handles = (0..8)
        .map(|idx| {
            let workflow = Arc::clone(&workflow);
            thread::spawn(move || {
                workflow
                    .create_note(&form(&format!("Concurrent {idx}"), ""))
                    .unwrap()
            })
        })
        .collect::<Vec<_>>();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), redirect());
    }

    let notes = workflow.store().read_all().unwrap();
    assert_eq!(notes.len(), 8);
    let mut ids = notes.iter().map(|note| note.id.clone()).collect::<Vec<_>>();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 8);
}

#[test]
fn workflow_round_trips_through_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");

    {
        let workflow = NoteWorkflow::new(JsonFileNoteStore::new(&path));
        assert!(workflow.list_notes().is_err());
        workflow.create_note(&form("Persisted note", "on disk")).unwrap();
    }

    let reopened = NoteWorkflow::new(JsonFileNoteStore::new(&path));
    let notes = reopened.list_notes().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Persisted note");
    assert_eq!(notes[0].content, "on disk");
}
