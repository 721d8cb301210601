//! Notes HTTP service.
//!
//! Serves the note listing and submission endpoints over a JSON flat file.
//!
//! Default: http://127.0.0.1:3000/notes

use log::{error, info};
use notes_core::{init_logging, JsonFileNoteStore, NoteWorkflow, NotesConfig};
use notes_web::build_router;
use notes_web::routes::AppState;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = match NotesConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("notes-web: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(config.log_level, config.log_dir.as_deref()) {
        eprintln!("notes-web: {err}");
        return ExitCode::FAILURE;
    }

    let store = JsonFileNoteStore::new(&config.notes_file);
    let state = Arc::new(AppState::new(NoteWorkflow::new(store)));
    let app = build_router(state);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(
                "event=server_bind module=web status=error addr={} error={}",
                config.bind_addr, err
            );
            return ExitCode::FAILURE;
        }
    };

    info!(
        "event=server_start module=web status=ok addr={} notes_file={}",
        config.bind_addr,
        config.notes_file.display()
    );

    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("event=server_stop module=web status=error error={err}");
        return ExitCode::FAILURE;
    }

    info!("event=server_stop module=web status=ok");
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("event=shutdown_signal module=web status=error error={err}");
    }
}
