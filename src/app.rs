//! App Core for Linkding Sync.
//!
//! Central struct tying the settings engine, the sync engine and the schedule
//! manager together, and managing the application lifecycle.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::{info, warn};

use crate::managers::schedule_manager::{sync_job, ScheduleManager, ScheduleManagerTrait};
use crate::services::linkding_client::LinkdingClient;
use crate::services::notifier::Notifier;
use crate::services::settings_engine::{
    FieldUpdate, JsonFileStore, KeyValueStore, SettingsEngine, SettingsEngineTrait,
};
use crate::services::sync_engine::{SyncEngine, SyncReport};
use crate::services::vault_store::{FileStore, VaultFileStore};
use crate::types::errors::{SettingsError, SyncError};
use crate::types::settings::{SettingField, SyncSettings};

/// Where the app keeps its settings and which vault it writes into.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Settings file override; the platform config directory is used when `None`.
    pub settings_path: Option<String>,
    /// Directory that `destinationPath` is resolved against.
    pub vault_root: PathBuf,
}

/// Central application struct. Shared as `Arc<App>` between the scheduler and
/// whichever surface drives manual syncs and settings edits.
pub struct App {
    settings_engine: Mutex<SettingsEngine>,
    sync_engine: SyncEngine,
    scheduler: Mutex<ScheduleManager>,
    scheduling_enabled: AtomicBool,
    notifier: Arc<dyn Notifier>,
    this: Weak<App>,
}

impl App {
    /// Creates the app from injected capabilities and loads the settings once.
    pub fn new(
        settings_store: Box<dyn KeyValueStore>,
        files: Arc<dyn FileStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Arc<Self>, SettingsError> {
        let mut settings_engine = SettingsEngine::new(settings_store);
        settings_engine.load()?;

        let sync_engine = SyncEngine::new(LinkdingClient::new(), files, notifier.clone());

        Ok(Arc::new_cyclic(|this| Self {
            settings_engine: Mutex::new(settings_engine),
            sync_engine,
            scheduler: Mutex::new(ScheduleManager::new()),
            scheduling_enabled: AtomicBool::new(false),
            notifier,
            this: this.clone(),
        }))
    }

    /// Creates the app with a JSON settings file and a vault on the local disk.
    pub fn open(config: &AppConfig, notifier: Arc<dyn Notifier>) -> Result<Arc<Self>, SettingsError> {
        let store = JsonFileStore::new(config.settings_path.clone());
        info!(settings = store.path(), vault = %config.vault_root.display(), "Opening app");
        Self::new(
            Box::new(store),
            Arc::new(VaultFileStore::new(config.vault_root.clone())),
            notifier,
        )
    }

    fn engine(&self) -> MutexGuard<'_, SettingsEngine> {
        self.settings_engine
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn schedule_manager(&self) -> MutexGuard<'_, ScheduleManager> {
        self.scheduler.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current settings.
    pub fn settings(&self) -> SyncSettings {
        self.engine().get_settings().clone()
    }

    /// Applies one settings-surface edit, saves it, and shows any validation notice.
    ///
    /// Changing the update interval while automatic fetching is active replaces the
    /// running trigger with one for the new interval.
    pub fn set_field(&self, field: SettingField, raw: &str) -> Result<FieldUpdate, SettingsError> {
        let (update, interval) = {
            let mut engine = self.engine();
            let update = engine.set_field(field, raw)?;
            (update, engine.get_settings().update_interval_minutes)
        };

        if let Some(notice) = &update.notice {
            self.notifier.notify(notice);
        }

        if field == SettingField::UpdateIntervalMinutes
            && update.changed
            && self.scheduling_enabled.load(Ordering::SeqCst)
        {
            info!(interval_minutes = interval, "Update interval changed; rescheduling");
            self.schedule(interval);
        }
        Ok(update)
    }

    /// Manual trigger: runs a sync immediately, independent of the timer.
    pub async fn sync_now(&self) -> Result<SyncReport, SyncError> {
        let settings = self.settings();
        self.sync_engine.sync_bookmarks(&settings).await
    }

    /// Starts automatic fetching with the configured interval. Returns whether a
    /// trigger is now running (false when the interval is 0).
    pub fn start_scheduler(&self) -> bool {
        self.scheduling_enabled.store(true, Ordering::SeqCst);
        let interval = self.settings().update_interval_minutes;
        self.schedule(interval)
    }

    fn schedule(&self, interval_minutes: u64) -> bool {
        let this = self.this.clone();
        let job = sync_job(move || {
            let app = this.upgrade();
            async move {
                if let Some(app) = app {
                    // Failures are already logged and surfaced by the sync engine.
                    let _ = app.sync_now().await;
                }
            }
        });
        self.schedule_manager().start(interval_minutes, job)
    }

    /// Whether a trigger is running, and its interval in minutes.
    pub fn scheduler_status(&self) -> (bool, Option<u64>) {
        let scheduler = self.schedule_manager();
        (scheduler.is_running(), scheduler.interval_minutes())
    }

    /// Shutdown sequence: stop the timer and persist settings.
    pub fn shutdown(&self) -> Result<(), SettingsError> {
        self.scheduling_enabled.store(false, Ordering::SeqCst);
        self.schedule_manager().stop();
        let result = self.engine().save();
        if let Err(e) = &result {
            warn!(error = %e, "Failed to save settings on shutdown");
        }
        result
    }
}
