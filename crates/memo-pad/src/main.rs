mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use memo_pad_config::config::MAX_UNDO_CAPACITY;
use memo_pad_config::AppConfig;
use memo_pad_history::config::{doc_id_for_path, generate_unsaved_id};
use memo_pad_history::{EditorSession, HistoryConfig, PersistenceLayer};

use crate::commands::Action;

/// Document used when neither `--doc` nor `--file` is given.
const DEFAULT_DOC_ID: &str = "default";

/// A versioned text editor with undo/redo history that survives between runs.
#[derive(Parser, Debug)]
#[command(name = "memo-pad", version, about)]
struct Cli {
    /// Path to the JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Document to operate on.
    #[arg(long, conflicts_with = "file")]
    doc: Option<String>,

    /// Use the history of this file's document.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Undo ring capacity, overriding the config (0 = unbounded).
    #[arg(long)]
    limit: Option<usize>,

    /// Keep history in memory only.
    #[arg(long)]
    in_memory: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replace the content.
    Change { text: String },
    /// Undo one or more steps.
    Undo {
        #[arg(short = 'n', long, default_value_t = 1)]
        steps: usize,
    },
    /// Redo one or more steps.
    Redo {
        #[arg(short = 'n', long, default_value_t = 1)]
        steps: usize,
    },
    /// Print the content and history counters.
    Show,
    /// Read one command per line from stdin.
    Script,
    /// Delete the stored history of the document.
    Clear,
    /// List documents with stored history.
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let config = AppConfig::load_or_create(&config_path);

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .init();

    tracing::debug!("Using config at {}", config_path.display());

    let history_config = build_history_config(&cli, &config);
    let persistence = if config.persist_history && !cli.in_memory {
        Some(PersistenceLayer::open(&history_config.data_dir)?)
    } else {
        None
    };

    let doc_id = resolve_doc_id(&cli, persistence.is_some());
    let open = |persistence: Option<Arc<PersistenceLayer>>| -> Result<EditorSession> {
        let session = EditorSession::load_or_new(doc_id, history_config, persistence)
            .context("Failed to open editor session")?;
        tracing::info!(doc_id = session.doc_id(), "Opened editor session");
        Ok(session)
    };

    let action = match cli.command {
        Command::List => return list_documents(persistence.as_deref()),
        Command::Script => {
            let mut session = open(persistence)?;
            let stdin = std::io::stdin();
            let failed = commands::run_script(&mut session, stdin.lock(), std::io::stdout())?;
            session.flush()?;
            if failed > 0 {
                anyhow::bail!("{failed} script line(s) failed");
            }
            return Ok(());
        }
        Command::Clear => {
            let mut session = open(persistence)?;
            session.delete_history()?;
            println!("Cleared history of {}", session.doc_id());
            return Ok(());
        }
        Command::Change { text } => Action::Change(text),
        Command::Undo { steps } => Action::Undo(steps),
        Command::Redo { steps } => Action::Redo(steps),
        Command::Show => Action::Show,
    };

    let mut session = open(persistence)?;
    let result = commands::apply(&mut session, &action);
    // Keep the steps that did apply, even if a later one failed.
    session.flush()?;
    println!("{}", commands::render(session.editor()));
    result?;
    Ok(())
}

fn list_documents(persistence: Option<&PersistenceLayer>) -> Result<()> {
    let Some(pl) = persistence else {
        anyhow::bail!("History persistence is disabled");
    };
    let mut docs = pl.list_documents()?;
    docs.sort();
    for doc in docs {
        println!("{doc}");
    }
    Ok(())
}

fn build_history_config(cli: &Cli, config: &AppConfig) -> HistoryConfig {
    let capacity = cli
        .limit
        .map_or(config.undo_capacity, |limit| limit.min(MAX_UNDO_CAPACITY));
    let mut history_config = HistoryConfig::with_capacity(capacity);
    if let Some(dir) = config.data_dir() {
        history_config.data_dir = dir;
    }
    history_config
}

fn resolve_doc_id(cli: &Cli, persistent: bool) -> String {
    match (&cli.doc, &cli.file) {
        (_, Some(path)) => doc_id_for_path(path),
        (Some(id), None) => id.clone(),
        (None, None) if persistent => DEFAULT_DOC_ID.to_string(),
        (None, None) => generate_unsaved_id(),
    }
}
