// Linkding Sync Settings Engine
// Loads settings by merging stored values over the built-in defaults, saves the whole
// object on every edit, and guards the numeric fields against unusable input.

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing::{debug, warn};

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::{SettingField, SyncSettings};

/// Host key-value persistence: an opaque blob in, the same blob out.
pub trait KeyValueStore: Send {
    /// Returns the stored blob, or `None` when nothing has been saved yet.
    fn load_data(&self) -> Result<Option<Value>, SettingsError>;
    fn save_data(&self, data: &Value) -> Result<(), SettingsError>;
}

/// Key-value store persisting the blob as a pretty-printed JSON file.
pub struct JsonFileStore {
    path: String,
}

impl JsonFileStore {
    /// Creates a store at `path_override`, or at `settings.json` in the platform
    /// config directory when no override is given.
    pub fn new(path_override: Option<String>) -> Self {
        let path = match path_override {
            Some(p) => p,
            None => platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string(),
        };
        Self { path }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl KeyValueStore for JsonFileStore {
    fn load_data(&self) -> Result<Option<Value>, SettingsError> {
        let path = Path::new(&self.path);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let value = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;
        Ok(Some(value))
    }

    fn save_data(&self, data: &Value) -> Result<(), SettingsError> {
        let path = Path::new(&self.path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(data).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))
    }
}

/// In-process key-value store. Clones share the same slot.
#[derive(Clone, Default)]
pub struct MemoryStore {
    data: Arc<Mutex<Option<Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: Value) -> Self {
        Self {
            data: Arc::new(Mutex::new(Some(data))),
        }
    }

    /// Returns whatever was last saved.
    pub fn snapshot(&self) -> Option<Value> {
        self.data.lock().ok().and_then(|guard| guard.clone())
    }
}

impl KeyValueStore for MemoryStore {
    fn load_data(&self) -> Result<Option<Value>, SettingsError> {
        let guard = self
            .data
            .lock()
            .map_err(|e| SettingsError::Unavailable(e.to_string()))?;
        Ok(guard.clone())
    }

    fn save_data(&self, data: &Value) -> Result<(), SettingsError> {
        let mut guard = self
            .data
            .lock()
            .map_err(|e| SettingsError::Unavailable(e.to_string()))?;
        *guard = Some(data.clone());
        Ok(())
    }
}

/// Outcome of a single field edit.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldUpdate {
    pub field: SettingField,
    /// Transient notice for the user, set when the input was rejected.
    pub notice: Option<String>,
    /// Whether the stored value differs from the one before the edit.
    pub changed: bool,
}

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<SyncSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &SyncSettings;
    fn set_field(&mut self, field: SettingField, raw: &str) -> Result<FieldUpdate, SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
}

/// Settings engine over an injected key-value store.
pub struct SettingsEngine {
    store: Box<dyn KeyValueStore>,
    settings: SyncSettings,
}

impl SettingsEngine {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            store,
            settings: SyncSettings::default(),
        }
    }

    /// Settings engine backed by a JSON file, see [`JsonFileStore::new`].
    pub fn from_path(path_override: Option<String>) -> Self {
        Self::new(Box::new(JsonFileStore::new(path_override)))
    }
}

/// Merges a stored blob over the defaults, one field at a time.
///
/// Fields present in `stored` win; absent or `null` fields keep their default.
/// A field whose stored value has the wrong type keeps its default and is logged.
/// Unknown keys are ignored.
pub fn merge_with_defaults(stored: Option<Value>) -> Result<SyncSettings, SettingsError> {
    let map = match stored {
        None | Some(Value::Null) => return Ok(SyncSettings::default()),
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(SettingsError::SerializationError(format!(
                "Expected a settings object, found: {}",
                other
            )))
        }
    };

    let mut settings = SyncSettings::default();
    for field in SettingField::ALL {
        let value = match map.get(field.storage_key()) {
            None | Some(Value::Null) => continue,
            Some(value) => value,
        };
        if !merge_field(&mut settings, field, value) {
            warn!(
                field = field.storage_key(),
                stored = %value,
                "Ignoring stored setting with the wrong type; using the default"
            );
        }
    }
    Ok(settings)
}

/// Applies one stored value. Returns false when its type does not fit the field.
fn merge_field(settings: &mut SyncSettings, field: SettingField, value: &Value) -> bool {
    if field.is_numeric() {
        match value.as_u64() {
            Some(n) => settings.set_number(field, n),
            None => return false,
        }
    } else {
        match value.as_str() {
            Some(s) => settings.set_text(field, s.to_string()),
            None => return false,
        }
    }
    true
}

/// Parses the leading integer of `raw`: optional whitespace and sign, then decimal
/// digits up to the first non-digit. Returns `None` when there are no leading digits.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let value: i64 = rest[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Default used when a numeric field edit is rejected.
fn numeric_default(field: SettingField) -> u64 {
    match field {
        SettingField::FetchLimit => SyncSettings::DEFAULT_FETCH_LIMIT,
        SettingField::FetchOffset => SyncSettings::DEFAULT_FETCH_OFFSET,
        _ => SyncSettings::DEFAULT_UPDATE_INTERVAL_MINUTES,
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the store, merged over the defaults.
    fn load(&mut self) -> Result<SyncSettings, SettingsError> {
        let stored = self.store.load_data()?;
        self.settings = merge_with_defaults(stored)?;
        debug!(instance_url = %self.settings.instance_url, "Settings loaded");
        Ok(self.settings.clone())
    }

    /// Writes the complete current settings back to the store.
    fn save(&self) -> Result<(), SettingsError> {
        let value = serde_json::to_value(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;
        self.store.save_data(&value)
    }

    fn get_settings(&self) -> &SyncSettings {
        &self.settings
    }

    /// Applies one edit from the settings surface and saves immediately.
    ///
    /// Numeric fields take the leading integer of `raw`; anything that yields no
    /// positive number resets the field to its default and produces a notice.
    fn set_field(&mut self, field: SettingField, raw: &str) -> Result<FieldUpdate, SettingsError> {
        let before = self.settings.clone();
        let mut notice = None;

        if field.is_numeric() {
            let value = match parse_leading_int(raw) {
                Some(n) if n > 0 => n as u64,
                _ => {
                    let fallback = numeric_default(field);
                    let message = format!(
                        "{} must be a positive number. Defaulting to {}",
                        field.label(),
                        fallback
                    );
                    warn!(field = field.storage_key(), input = raw, "{}", message);
                    notice = Some(message);
                    fallback
                }
            };
            self.settings.set_number(field, value);
        } else {
            self.settings.set_text(field, raw.to_string());
        }

        self.save()?;

        Ok(FieldUpdate {
            field,
            notice,
            changed: before != self.settings,
        })
    }

    /// Resets all settings to factory defaults and saves.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = SyncSettings::default();
        self.save()
    }
}
