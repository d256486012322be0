// Linkding Sync services
// Services provide the sync pipeline: settings, HTTP client, formatting, vault storage, notices.

pub mod bookmark_formatter;
pub mod linkding_client;
pub mod notifier;
pub mod settings_engine;
pub mod sync_engine;
pub mod vault_store;
