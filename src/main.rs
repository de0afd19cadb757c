//! Markpad - A terminal markdown editor with live preview.
//!
//! # Usage
//!
//! ```bash
//! markpad NOTES.md
//! markpad --edit NOTES.md
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use markpad::app::App;
use markpad::persist;

/// A terminal markdown editor with live preview
#[derive(Parser, Debug)]
#[command(name = "markpad", version, about, long_about = None)]
struct Cli {
    /// Markdown file to open
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Start in the raw text editor instead of the preview
    #[arg(short, long)]
    edit: bool,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    // Load up front so read failures never reach the UI and the message
    // prints on a normal (non-raw) terminal. The loaded text is handed to
    // the app; the file is not read again.
    let text = match persist::load(&cli.file) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("markpad: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut app = App::new(cli.file, text).with_editor_mode(cli.edit);
    match app.run().context("Application error") {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("markpad: {err:#}");
            ExitCode::FAILURE
        }
    }
}
