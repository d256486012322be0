//! Linkding Sync RPC Server — JSON-RPC over stdin/stdout for host UI integration.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"sync.fetch", "params":{}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//! Notices:  {"event":"notice", "message":"..."}
//!
//! Automatic fetching runs in the background for as long as stdin stays open.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use serde_json::{json, Value};
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing::{error, info};

use linkding_sync::app::{App, AppConfig};
use linkding_sync::logging;
use linkding_sync::rpc_handler::handle_method;
use linkding_sync::services::notifier::RpcNotifier;

#[derive(Parser, Debug)]
#[command(name = "linkding-sync-rpc", version, about = "JSON-RPC bridge for Linkding Sync")]
struct Args {
    /// Settings file (defaults to settings.json in the platform config directory).
    #[arg(long, env = "LINKDING_SYNC_CONFIG")]
    config: Option<String>,

    /// Vault directory the destination path is relative to.
    #[arg(long, env = "LINKDING_SYNC_VAULT", default_value = ".")]
    vault: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    // stdout carries the protocol, so console logs go to stderr.
    let _guard = logging::init_logging("rpc");

    let config = AppConfig {
        settings_path: args.config,
        vault_root: args.vault,
    };
    let app = App::open(&config, Arc::new(RpcNotifier))?;
    app.start_scheduler();

    println!("{}", json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}));

    let mut lines = BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                println!("{}", json!({"id": null, "error": format!("parse error: {}", e)}));
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let response = match handle_method(&app, method, &params).await {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        };
        println!("{}", response);
    }

    info!("stdin closed; shutting down");
    if let Err(e) = app.shutdown() {
        error!(error = %e, "Shutdown failed");
    }
    Ok(())
}
