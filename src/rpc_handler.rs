//! RPC method handler for the Linkding Sync JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches each call to the shared `App`.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::app::App;
use crate::types::settings::SettingField;

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(app: &Arc<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Settings ───
        // The API key is masked in everything sent back to the host.
        "settings.get" => serde_json::to_value(app.settings().redacted()).map_err(|e| e.to_string()),
        "settings.fields" => {
            let settings =
                serde_json::to_value(app.settings().redacted()).map_err(|e| e.to_string())?;
            let fields: Vec<Value> = SettingField::ALL
                .iter()
                .map(|f| {
                    json!({
                        "key": f.storage_key(),
                        "label": f.label(),
                        "description": f.description(),
                        "numeric": f.is_numeric(),
                        "value": settings.get(f.storage_key()).cloned().unwrap_or(Value::Null),
                    })
                })
                .collect();
            Ok(json!(fields))
        }
        "settings.set" => {
            let name = params.get("field").and_then(|v| v.as_str()).ok_or("missing field")?;
            let field = SettingField::from_name(name).ok_or_else(|| format!("unknown field: {}", name))?;
            // Editors deliver text; numbers are accepted and stringified.
            let raw = match params.get("value") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                Some(Value::Null) | None => return Err("missing value".to_string()),
                Some(other) => other.to_string(),
            };
            let update = app.set_field(field, &raw).map_err(|e| e.to_string())?;
            let settings =
                serde_json::to_value(app.settings().redacted()).map_err(|e| e.to_string())?;
            Ok(json!({
                "ok": true,
                "field": field.storage_key(),
                "value": settings.get(field.storage_key()).cloned().unwrap_or(Value::Null),
                "notice": update.notice,
            }))
        }

        // ─── Sync ───
        "sync.fetch" => {
            let report = app.sync_now().await.map_err(|e| e.to_string())?;
            Ok(json!({
                "run_id": report.run_id.to_string(),
                "destination": report.destination,
                "appended": report.appended,
                "total_available": report.total_available,
            }))
        }

        // ─── Scheduler ───
        "scheduler.status" => {
            let (running, interval) = app.scheduler_status();
            Ok(json!({"running": running, "interval_minutes": interval}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
