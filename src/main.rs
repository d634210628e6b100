//! copyme — command-line front end for the clipboard history.

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use copyme::app::App;
use copyme::logging;
use copyme::managers::history_store::HistoryStoreTrait;
use copyme::services::settings_engine::SettingsEngineTrait;
use copyme::types::errors::PersistenceError;

#[derive(Parser)]
#[command(name = "copyme", version, about = "Your friendly neighborhood clipboard")]
struct Cli {
    /// Settings file to use instead of the platform default.
    #[arg(long, global = true, env = "COPYME_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a clip (all words are joined with spaces).
    Add {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// List clips, newest first.
    List,
    /// Copy one clip to the system clipboard.
    Copy { id: String },
    /// Copy every clip, joined by the configured separator.
    CopyAll,
    /// Delete a clip.
    Delete { id: String },
    /// Show how much storage the history record uses.
    Usage,
    /// Show or change settings.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand)]
enum ConfigCommand {
    Show,
    /// Set a value by dot path, e.g. `notification.duration_ms 4000`.
    /// The value is parsed as JSON, falling back to a plain string.
    Set { key: String, value: String },
    Reset,
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    let mut app = match App::open(cli.config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("copyme: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if app.store.rehydration().is_degraded() {
        eprintln!("warning: stored history could not be used, starting with an empty history");
    }

    match run(&mut app, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("copyme: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn warn_if_not_persisted(warning: Option<&PersistenceError>) {
    if let Some(e) = warning {
        eprintln!("warning: change kept in memory only: {}", e);
    }
}

async fn run(app: &mut App, command: Command) -> Result<(), String> {
    match command {
        Command::Add { text } => match app.add_clip(&text.join(" ")) {
            Some(saved) => {
                warn_if_not_persisted(saved.warning());
                println!("{}", saved.value.id);
            }
            None => return Err("nothing to add: text is empty".to_string()),
        },
        Command::List => {
            if app.store.is_empty() {
                println!("No items yet");
            }
            for item in app.store.items() {
                println!("{}\t{}", item.id, item.preview(60).replace('\n', " "));
            }
        }
        Command::Copy { id } => {
            let copied = app.copy_item(&id).await.map_err(|e| e.to_string())?;
            println!("{}", copied.message);
        }
        Command::CopyAll => match app.copy_all().await.map_err(|e| e.to_string())? {
            Some(copied) => println!("{}", copied.message),
            None => println!("No items yet"),
        },
        Command::Delete { id } => {
            let saved = app.delete_clip(&id);
            warn_if_not_persisted(saved.warning());
            if saved.value.is_none() {
                println!("No clip with id {}", id);
            }
        }
        Command::Usage => {
            let usage = app.storage_usage().map_err(|e| e.to_string())?;
            println!("Usage: {}", usage.formatted);
        }
        Command::Config(ConfigCommand::Show) => {
            let json = serde_json::to_string_pretty(app.settings()).map_err(|e| e.to_string())?;
            println!("{}", json);
        }
        Command::Config(ConfigCommand::Set { key, value }) => {
            let value = serde_json::from_str(&value).unwrap_or(serde_json::Value::String(value));
            app.settings_engine
                .set_value(&key, value)
                .map_err(|e| e.to_string())?;
        }
        Command::Config(ConfigCommand::Reset) => {
            app.settings_engine.reset().map_err(|e| e.to_string())?;
        }
    }
    Ok(())
}
