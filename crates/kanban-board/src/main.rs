//! Kanban board: command-line entry point.
//!
//! Loads the board from local storage, applies one command, saves, and prints
//! the rendered board to stdout.  Logs go to stderr.
//!
//! # Usage
//!
//! ```text
//! kanban [OPTIONS] [COMMAND]
//!
//! Commands:
//!   show                            Print the board (default)
//!   add <COLUMN> <TEXT>...          Append a card to a column
//!   delete <COLUMN> <CARD_ID>       Delete a card
//!   move <CARD_ID> <COLUMN> <INDEX> Move a card to a position
//!   layout                          Print the on-screen geometry
//!   replay <SCRIPT>                 Feed a JSON pointer script through the drag engine
//!
//! Options:
//!   --config <PATH>     Config file [env: KANBAN_CONFIG]
//!   --data-dir <DIR>    Directory holding the board file [env: KANBAN_DATA_DIR]
//! ```
//!
//! `RUST_LOG` overrides the configured log level, e.g.
//! `RUST_LOG=kanban_board=debug kanban replay drag.json`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use kanban_core::{CardId, ColumnId};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use kanban_board::application::board_session::{AppError, BoardRenderer, BoardSession};
use kanban_board::infrastructure::pointer::script::load_script;
use kanban_board::infrastructure::render::feedback::TracingFeedback;
use kanban_board::infrastructure::render::text::{describe_layout, TextRenderer};
use kanban_board::infrastructure::storage::backend::FileStorage;
use kanban_board::infrastructure::storage::board_store::BoardStore;
use kanban_board::infrastructure::storage::config::{
    load_config, load_config_from, AppConfig, ConfigError,
};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Three-column kanban board with drag-and-drop reordering.
#[derive(Debug, Parser)]
#[command(name = "kanban", about = "Kanban board with drag-and-drop card reordering", version)]
struct Cli {
    /// Path to the TOML config file.  Defaults to the platform config dir.
    #[arg(long, env = "KANBAN_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the board file.  Overrides `[storage] data_dir`.
    #[arg(long, env = "KANBAN_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the board.
    Show,
    /// Append a card to a column (`todo`, `in-progress`, `done`).
    Add {
        column: ColumnId,
        /// Card text; multiple words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Delete a card.  Deleting a card that does not exist is not an error.
    Delete { column: ColumnId, card_id: String },
    /// Move a card to `index` in `column` (counted without the card itself).
    Move {
        card_id: String,
        column: ColumnId,
        index: usize,
    },
    /// Print the computed geometry of columns and cards.
    Layout,
    /// Replay a JSON array of pointer events through the drag engine.
    Replay { script: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => match load_config() {
            Err(ConfigError::NoPlatformConfigDir) => AppConfig::default(),
            other => other.context("failed to load config")?,
        },
    };

    // Initialise structured logging.  RUST_LOG takes precedence over the config.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.app.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => config
            .storage
            .resolve_data_dir()
            .context("no data directory configured; pass --data-dir")?,
    };
    info!(data_dir = %data_dir.display(), key = %config.storage.key, "kanban starting");

    let store = BoardStore::with_key(FileStorage::new(data_dir), config.storage.key.clone());
    let renderer = Arc::new(TextRenderer::new());
    let mut session = BoardSession::new(
        Arc::new(store),
        Arc::clone(&renderer) as Arc<dyn BoardRenderer>,
        Arc::new(TracingFeedback::new()),
        config.layout.to_metrics(),
    );
    session.start();

    let command = cli.command.unwrap_or(Command::Show);
    if let Command::Layout = command {
        print!("{}", describe_layout(session.layout()));
        return Ok(());
    }

    let outcome = run(&mut session, command);
    print!("{}", renderer.frame());
    outcome
}

/// Applies `command` to the session.  The frame is printed by the caller
/// whether or not this succeeds.
fn run(session: &mut BoardSession, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Show | Command::Layout => Ok(()),
        Command::Add { column, text } => {
            session
                .add_card(column, &text.join(" "))
                .context("failed to add card")?;
            Ok(())
        }
        Command::Delete { column, card_id } => {
            session
                .delete_card(column, &CardId::new(card_id))
                .context("failed to delete card")?;
            Ok(())
        }
        Command::Move {
            card_id,
            column,
            index,
        } => {
            session
                .move_card(&CardId::new(card_id), column, index)
                .context("failed to move card")?;
            Ok(())
        }
        Command::Replay { script } => {
            let events = load_script(&script)
                .with_context(|| format!("failed to read pointer script {}", script.display()))?;
            let mut unsaved = 0usize;
            for (n, event) in events.into_iter().enumerate() {
                match session.handle_event(event) {
                    Ok(_) => {}
                    Err(AppError::Persist(_)) => unsaved += 1,
                    Err(e) => {
                        error!(event = n, error = %e, "pointer event failed");
                        return Err(e).with_context(|| format!("pointer event #{n} failed"));
                    }
                }
            }
            if unsaved > 0 {
                bail!("{unsaved} change(s) could not be saved");
            }
            Ok(())
        }
    }
}
