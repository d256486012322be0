//! Linkding Sync — appends bookmarks from a Linkding instance to a Markdown note.
//!
//! Entry point for the command-line host: one-off fetches, settings editing, and a
//! `watch` mode that keeps the periodic trigger running until Ctrl-C.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use linkding_sync::app::{App, AppConfig};
use linkding_sync::logging;
use linkding_sync::services::notifier::ConsoleNotifier;
use linkding_sync::types::errors::SettingsError;
use linkding_sync::types::settings::SettingField;

#[derive(Parser, Debug)]
#[command(name = "linkding-sync", version, about = "Append Linkding bookmarks to a Markdown note")]
struct Cli {
    /// Settings file (defaults to settings.json in the platform config directory).
    #[arg(long, global = true, env = "LINKDING_SYNC_CONFIG")]
    config: Option<String>,

    /// Vault directory the destination path is relative to.
    #[arg(long, global = true, env = "LINKDING_SYNC_VAULT", default_value = ".")]
    vault: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch bookmarks once and append them to the destination note.
    Fetch,
    /// Show or edit settings.
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Keep fetching on the configured interval until interrupted.
    Watch,
}

#[derive(Subcommand, Debug)]
enum SettingsAction {
    /// Print the current settings (API key masked).
    Show,
    /// Edit one field, e.g. `settings set fetch-limit 50`.
    Set { field: String, value: String },
    /// List editable fields.
    Fields,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = logging::init_logging("cli");

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = AppConfig {
        settings_path: cli.config,
        vault_root: cli.vault,
    };
    let app = App::open(&config, Arc::new(ConsoleNotifier))?;

    // Shut down on every path so the timer stops and settings are saved.
    let outcome = execute(&app, cli.command).await;
    let shutdown = app.shutdown();
    outcome?;
    shutdown?;
    Ok(())
}

async fn execute(app: &App, command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Fetch => {
            let report = app.sync_now().await?;
            println!(
                "Appended {} bookmark(s) to {}",
                report.appended, report.destination
            );
        }
        Command::Settings { action } => match action {
            SettingsAction::Show => {
                println!("{}", serde_json::to_string_pretty(&app.settings().redacted())?);
            }
            SettingsAction::Set { field, value } => {
                let field = SettingField::from_name(&field)
                    .ok_or_else(|| SettingsError::InvalidKey(field.clone()))?;
                app.set_field(field, &value)?;
                let settings = serde_json::to_value(app.settings().redacted())?;
                println!(
                    "{} = {}",
                    field.storage_key(),
                    settings.get(field.storage_key()).cloned().unwrap_or_default()
                );
            }
            SettingsAction::Fields => {
                for field in SettingField::ALL {
                    println!("{:<24} {}", field.storage_key(), field.description());
                }
            }
        },
        Command::Watch => {
            if !app.start_scheduler() {
                return Err("updateIntervalMinutes is 0; automatic fetching is disabled".into());
            }
            info!("Watching; press Ctrl-C to stop");
            tokio::signal::ctrl_c().await?;
            info!("Interrupted");
        }
    }
    Ok(())
}
