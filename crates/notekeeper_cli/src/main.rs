//! Startup entry point.
//!
//! # Responsibility
//! - Read configuration once, start logging, and open note storage.
//! - Abort with a non-zero exit code when storage cannot be initialized.
//! - Print a short collection summary for local sanity checks.

use log::{error, info};
use notekeeper_core::{AppConfig, FileStorage, NoteManager};
use std::process::ExitCode;

const SUMMARY_PREVIEW_CHARS: usize = 60;

fn main() -> ExitCode {
    let config = AppConfig::from_env();

    if let Some(log_dir) = config.log_dir.as_ref() {
        if let Err(err) = notekeeper_core::init_logging(&config.log_level, log_dir) {
            eprintln!("notekeeper: logging disabled: {err}");
        }
    }

    let storage = match FileStorage::initialize(&config.storage) {
        Ok(storage) => storage,
        Err(err) => {
            error!("event=app_init module=cli status=error error={err}");
            eprintln!("notekeeper: {err}");
            return ExitCode::FAILURE;
        }
    };

    let manager = NoteManager::load(storage);
    info!(
        "event=app_init module=cli status=ok notes={}",
        manager.len()
    );

    println!("notekeeper_core version={}", notekeeper_core::core_version());
    println!("notes_file={}", manager.store().notes_path().display());
    println!("notes={}", manager.len());
    for note in manager.active_notes() {
        let preview = note.summary(SUMMARY_PREVIEW_CHARS).unwrap_or_default();
        println!(
            "{} {} [{}] {}",
            note.updated_at().format("%Y-%m-%d %H:%M"),
            note.id(),
            note.title(),
            preview
        );
    }

    ExitCode::SUCCESS
}
