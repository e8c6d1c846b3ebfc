//! searchsync - export and import browser search engines.
//!
//! Exports the `keywords` table of a Chromium-family browser's `Web Data`
//! store to a portable JSON backup, and imports such a backup into another
//! store, reconciling conflicts per entry.

use clap::{Parser, Subcommand};
use searchsync_cli::{ops, AppError, Config, ConflictPolicy, KeywordStore};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "searchsync")]
#[command(about = "Export and import browser search engines")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export search engines from a browser store to a backup file
    Export {
        /// Path to the browser's Web Data SQLite store
        #[arg(long)]
        store: Option<PathBuf>,

        /// Browser whose default store location to use instead of --store
        #[arg(long)]
        browser: Option<String>,

        /// Backup file to write [default: engines.json]
        #[arg(long)]
        backup: Option<PathBuf>,
    },

    /// Import search engines from a backup file into a browser store
    Import {
        /// Path to the browser's Web Data SQLite store
        #[arg(long)]
        store: Option<PathBuf>,

        /// Browser whose default store location to use instead of --store
        #[arg(long)]
        browser: Option<String>,

        /// Backup file to read [default: engines.json]
        #[arg(long)]
        backup: Option<PathBuf>,

        /// How to handle conflicting entries
        #[arg(long, value_enum, default_value_t = ConflictPolicy::Ask)]
        on_conflict: ConflictPolicy,

        /// Print the import summary as JSON on stdout
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    // Initialize tracing; logs go to stderr, results to stdout.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "searchsync=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenvy::dotenv().ok();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> searchsync_cli::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // The store is locked while the browser runs.
    eprintln!("Close the browser before import or export.");

    match cli.command {
        Commands::Export {
            store,
            browser,
            backup,
        } => {
            let store = resolve_store(store, browser, &config)?;
            let backup_path = backup.unwrap_or_else(|| config.backup_file.clone());

            let count = ops::export(&store, &backup_path)?;
            println!(
                "Exported {count} search engines to {}",
                backup_path.display()
            );
        }
        Commands::Import {
            store,
            browser,
            backup,
            on_conflict,
            json,
        } => {
            let store = resolve_store(store, browser, &config)?;
            let backup_path = backup.unwrap_or_else(|| config.backup_file.clone());
            let mut provider = on_conflict.provider();

            let summary = ops::import(&backup_path, &store, provider.as_mut())?;
            if json {
                let text = serde_json::to_string_pretty(&summary)
                    .map_err(std::io::Error::other)?;
                println!("{text}");
            } else {
                println!(
                    "Imported into {}: {} inserted, {} replaced, {} skipped, {} conflicts resolved",
                    store.path().display(),
                    summary.inserted,
                    summary.replaced,
                    summary.skipped,
                    summary.conflicts_resolved
                );
            }
        }
    }

    Ok(())
}

/// Pick the target store: an explicit path wins, then the named browser's
/// default `Web Data` location, then the configured default browser.
fn resolve_store(
    store: Option<PathBuf>,
    browser: Option<String>,
    config: &Config,
) -> searchsync_cli::Result<KeywordStore> {
    if let Some(path) = store {
        return KeywordStore::open(path);
    }

    let browser = browser
        .or_else(|| config.browser.clone())
        .ok_or(AppError::NoStore)?;
    let path = searchsync_cli::locations::web_data_path(&browser)
        .ok_or(AppError::UnknownBrowser(browser))?;
    KeywordStore::open(path)
}
