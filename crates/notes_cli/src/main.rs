//! Command-line entry point over the note workflow.
//!
//! # Responsibility
//! - Run list/create against the configured JSON file without the server.
//! - Keep output deterministic for scripting.
//!
//! Exit codes: 0 success, 1 no notes or storage failure, 2 rejected input.

use clap::{Parser, Subcommand};
use notes_core::{
    init_logging, CreateNoteOutcome, JsonFileNoteStore, NoteDraft, NoteStore, NoteWorkflow,
    NoteWorkflowError, NotesConfig,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "notes")]
#[command(author, version, about = "Manage notes stored in a JSON file")]
#[command(propagate_version = true)]
struct Cli {
    /// Notes file (overrides NOTES_FILE)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print all notes in insertion order
    List,

    /// Add a note
    Add {
        /// Note title (at least 5 characters after trimming)
        #[arg(short, long)]
        title: String,

        /// Note body
        #[arg(short, long, default_value = "")]
        content: String,
    },
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match NotesConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("notes: {err}");
            return ExitCode::FAILURE;
        }
    };

    // CLI logs only when a directory is configured; stdout stays clean.
    if let Some(log_dir) = config.log_dir.as_deref() {
        if let Err(err) = init_logging(config.log_level, Some(log_dir)) {
            eprintln!("notes: {err}");
            return ExitCode::FAILURE;
        }
    }

    let notes_file = cli.file.unwrap_or(config.notes_file);
    let workflow = NoteWorkflow::new(JsonFileNoteStore::new(notes_file));

    let status = match cli.command {
        Commands::List => run_list(&workflow),
        Commands::Add { title, content } => run_add(&workflow, NoteDraft::new(title, content)),
    };
    status.exit_code()
}

/// Result of one subcommand, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandStatus {
    Done,
    Empty,
    Rejected,
    Failed,
}

impl CommandStatus {
    fn exit_code(self) -> ExitCode {
        match self {
            Self::Done => ExitCode::SUCCESS,
            Self::Empty | Self::Failed => ExitCode::from(1),
            Self::Rejected => ExitCode::from(2),
        }
    }
}

fn run_list<S: NoteStore>(workflow: &NoteWorkflow<S>) -> CommandStatus {
    match workflow.list_notes() {
        Ok(notes) => {
            for note in notes {
                println!("[{}] {}", note.id, note.title);
                if !note.content.is_empty() {
                    println!("    {}", note.content.replace('\n', "\n    "));
                }
            }
            CommandStatus::Done
        }
        Err(NoteWorkflowError::NotFound { message }) => {
            println!("{message}");
            CommandStatus::Empty
        }
        Err(err) => report_failure(&err),
    }
}

fn run_add<S: NoteStore>(workflow: &NoteWorkflow<S>, draft: NoteDraft) -> CommandStatus {
    match workflow.create_from_draft(draft) {
        Ok(CreateNoteOutcome::Redirect { .. }) => {
            println!("Note created.");
            CommandStatus::Done
        }
        Ok(CreateNoteOutcome::Rejected { message }) => {
            eprintln!("{message}");
            CommandStatus::Rejected
        }
        Err(err) => report_failure(&err),
    }
}

fn report_failure(err: &NoteWorkflowError) -> CommandStatus {
    log::error!("event=cli_command module=cli status=error error={err}");
    eprintln!("An error related to your notes occurred!");
    eprintln!("{err}");
    CommandStatus::Failed
}
