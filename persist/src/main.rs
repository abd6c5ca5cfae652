//! `persist`: mark labs for persistence.
//!
//! Maintains `~/.clab/persist.yaml` (or `$PERSIST_PATH`), a list of absolute lab
//! paths. `persist toggle <path>` adds the path if it is absent and removes it
//! otherwise.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::debug;

use persist::error::ToggleError;
use persist::exit_codes;
use persist::io::config::{PERSIST_PATH_ENV, StoreConfig};
use persist::io::notify::{ChangeObserver, CommandObserver, NoopObserver};
use persist::io::store::PersistStore;
use persist::logging;
use persist::toggle::ToggleService;

#[derive(Parser)]
#[command(name = "persist", version, about = "Mark containerlab labs for persistence")]
struct Cli {
    /// State file (default: ~/.clab/persist.yaml). Blank values use the default.
    #[arg(long, global = true, env = PERSIST_PATH_ENV)]
    file: Option<String>,

    /// Shell command to run after the persist list changes.
    #[arg(long, global = true, env = "PERSIST_NOTIFY_CMD")]
    notify_cmd: Option<String>,

    /// Log read/write details to stderr (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add the lab path if absent, remove it if present.
    Toggle {
        /// Absolute path of the lab, compared verbatim.
        path: Option<String>,
        /// Print the outcome as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the persisted lab paths, sorted.
    List {
        /// Print the paths as a JSON array.
        #[arg(long)]
        json: bool,
    },
    /// Print the resolved state file location.
    Location,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let code = match run(cli) {
        Ok(()) => exit_codes::OK,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_code_for(&err)
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<()> {
    let store = PersistStore::new(StoreConfig {
        path_override: cli.file,
        home_dir: None,
    });
    match cli.command {
        Command::Toggle { path, json } => cmd_toggle(store, cli.notify_cmd, path, json),
        Command::List { json } => cmd_list(&store, json),
        Command::Location => cmd_location(&store),
    }
}

fn cmd_toggle(
    store: PersistStore,
    notify_cmd: Option<String>,
    path: Option<String>,
    json: bool,
) -> Result<()> {
    let observer: Box<dyn ChangeObserver> = match notify_cmd.filter(|cmd| !cmd.trim().is_empty()) {
        Some(cmd) => {
            debug!(command = %cmd, "using notify command");
            Box::new(CommandObserver::new(cmd))
        }
        None => Box::new(NoopObserver),
    };
    let service = ToggleService::new(store, observer);
    let path = path.unwrap_or_default();
    let outcome = service.toggle(&path)?;
    if json {
        println!("{}", json!({ "outcome": outcome, "path": path }));
    } else {
        println!("{}", outcome.message());
    }
    Ok(())
}

fn cmd_list(store: &PersistStore, json: bool) -> Result<()> {
    let labs = store.load().context("load persist list")?;
    if json {
        let payload = serde_json::to_string_pretty(&labs).context("serialize persist list")?;
        println!("{}", payload);
    } else {
        for lab in &labs {
            println!("{}", lab);
        }
    }
    Ok(())
}

fn cmd_location(store: &PersistStore) -> Result<()> {
    let location = store.location()?;
    println!("{}", location.display());
    Ok(())
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ToggleError>() {
        Some(toggle_err) if toggle_err.is_invalid_input() => exit_codes::INVALID_INPUT,
        _ => exit_codes::FAILURE,
    }
}
