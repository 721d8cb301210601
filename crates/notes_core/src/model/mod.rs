//! Domain model for persisted notes.
//!
//! # Responsibility
//! - Define the record shape written to and read from the note store.
//! - Own the title validation rule applied on insert.
//!
//! # Invariants
//! - Every persisted note carries a non-empty, unique `id`.
//! - Only `title` and `content` are accepted from submitted form data.

pub mod note;
