//! msgseek - keyword search and navigation for chat transcripts.
//!
//! # Usage
//!
//! ```bash
//! msgseek chat.jsonl
//! msgseek --watch chat.jsonl
//! msgseek --mode confirm --no-highlight --save chat.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use msgseek::app::App;
use msgseek::settings::RenderMode;

/// Search, highlight and jump around a chat transcript
#[derive(Parser, Debug)]
#[command(name = "msgseek", version, about, long_about = None)]
struct Cli {
    /// Transcript file (JSON array or JSON Lines)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Watch the transcript for changes and reload it
    #[arg(short, long)]
    watch: bool,

    /// Settings file to use instead of the platform default
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Search as you type (realtime) or only on Enter/Search (confirm)
    #[arg(long, value_enum)]
    mode: Option<RenderMode>,

    /// Do not mark the keyword inside matched messages
    #[arg(long)]
    no_highlight: bool,

    /// Persist the effective settings as the new defaults
    #[arg(long)]
    save: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so they don't fight the alternate screen.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut app = App::new(cli.file.clone())
        .with_watch(cli.watch)
        .with_render_mode(cli.mode)
        .with_highlight(cli.no_highlight.then_some(false))
        .with_save(cli.save);
    if let Some(path) = cli.settings {
        app = app.with_settings_path(path);
    }

    app.run()
        .with_context(|| format!("Failed to view {}", cli.file.display()))
}
