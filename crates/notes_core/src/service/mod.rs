//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into list/create use-cases.
//! - Keep HTTP and CLI adapters decoupled from storage details.

pub mod clock;
pub mod note_workflow;
