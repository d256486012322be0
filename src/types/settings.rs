use serde::{Deserialize, Serialize};

/// Persisted sync configuration.
///
/// Storage keys follow the host's camelCase naming. Every field falls back to its
/// default when missing from storage, so an older or partial settings file still loads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SyncSettings {
    #[serde(rename = "instanceURL")]
    pub instance_url: String,
    pub api_key: String,
    pub destination_path: String,
    pub update_interval_minutes: u64,
    pub search_query: String,
    pub fetch_limit: u64,
    pub fetch_offset: u64,
}

impl SyncSettings {
    pub const DEFAULT_INSTANCE_URL: &'static str = "http://192.168.50.203:9090";
    pub const DEFAULT_DESTINATION_PATH: &'static str = "notes/linkdingnotes";
    pub const DEFAULT_UPDATE_INTERVAL_MINUTES: u64 = 30;
    pub const DEFAULT_FETCH_LIMIT: u64 = 100;
    pub const DEFAULT_FETCH_OFFSET: u64 = 0;

    /// Stores `value` in a numeric field. Text fields are left untouched.
    pub fn set_number(&mut self, field: SettingField, value: u64) {
        match field {
            SettingField::FetchLimit => self.fetch_limit = value,
            SettingField::FetchOffset => self.fetch_offset = value,
            SettingField::UpdateIntervalMinutes => self.update_interval_minutes = value,
            _ => {}
        }
    }

    /// Stores `value` in a text field. Numeric fields are left untouched.
    pub fn set_text(&mut self, field: SettingField, value: String) {
        match field {
            SettingField::InstanceUrl => self.instance_url = value,
            SettingField::ApiKey => self.api_key = value,
            SettingField::SearchQuery => self.search_query = value,
            SettingField::DestinationPath => self.destination_path = value,
            _ => {}
        }
    }

    /// Copy of the settings with the API key masked, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.api_key.is_empty() {
            copy.api_key = "********".to_string();
        }
        copy
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            instance_url: Self::DEFAULT_INSTANCE_URL.to_string(),
            api_key: String::new(),
            destination_path: Self::DEFAULT_DESTINATION_PATH.to_string(),
            update_interval_minutes: Self::DEFAULT_UPDATE_INTERVAL_MINUTES,
            search_query: String::new(),
            fetch_limit: Self::DEFAULT_FETCH_LIMIT,
            fetch_offset: Self::DEFAULT_FETCH_OFFSET,
        }
    }
}

/// One editable settings field, as exposed by the settings surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingField {
    InstanceUrl,
    ApiKey,
    SearchQuery,
    FetchLimit,
    FetchOffset,
    DestinationPath,
    UpdateIntervalMinutes,
}

impl SettingField {
    /// All fields in the order the settings surface lists them.
    pub const ALL: [SettingField; 7] = [
        SettingField::InstanceUrl,
        SettingField::ApiKey,
        SettingField::SearchQuery,
        SettingField::FetchLimit,
        SettingField::FetchOffset,
        SettingField::DestinationPath,
        SettingField::UpdateIntervalMinutes,
    ];

    /// The key used in persisted storage.
    pub fn storage_key(&self) -> &'static str {
        match self {
            SettingField::InstanceUrl => "instanceURL",
            SettingField::ApiKey => "apiKey",
            SettingField::SearchQuery => "searchQuery",
            SettingField::FetchLimit => "fetchLimit",
            SettingField::FetchOffset => "fetchOffset",
            SettingField::DestinationPath => "destinationPath",
            SettingField::UpdateIntervalMinutes => "updateIntervalMinutes",
        }
    }

    /// Human-readable label, also used in validation notices.
    pub fn label(&self) -> &'static str {
        match self {
            SettingField::InstanceUrl => "Linkding Instance URL",
            SettingField::ApiKey => "Linkding API Key",
            SettingField::SearchQuery => "Search Query",
            SettingField::FetchLimit => "Results Limit",
            SettingField::FetchOffset => "Offset",
            SettingField::DestinationPath => "File to save bookmarks to",
            SettingField::UpdateIntervalMinutes => "Update Interval",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SettingField::InstanceUrl => "The URL where your Linkding instance is hosted.",
            SettingField::ApiKey => {
                "REST API token sent as an Authorization header with every request."
            }
            SettingField::SearchQuery => {
                "Optional search phrase, filtered server-side like the Linkding UI."
            }
            SettingField::FetchLimit => "Maximum number of bookmarks returned. Defaults to 100.",
            SettingField::FetchOffset => "Index from which to start returning results. Defaults to 0.",
            SettingField::DestinationPath => "Vault-relative path of the note receiving bookmarks.",
            SettingField::UpdateIntervalMinutes => {
                "How often to fetch bookmarks, in minutes. 0 disables automatic fetching."
            }
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            SettingField::FetchLimit | SettingField::FetchOffset | SettingField::UpdateIntervalMinutes
        )
    }

    /// Parses a field name: the storage key (`fetchLimit`), kebab-case (`fetch-limit`)
    /// or snake_case (`fetch_limit`). Case-insensitive.
    pub fn from_name(name: &str) -> Option<SettingField> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(|c| c.to_lowercase())
            .collect();
        match normalized.as_str() {
            "instanceurl" | "url" => Some(SettingField::InstanceUrl),
            "apikey" | "token" => Some(SettingField::ApiKey),
            "searchquery" | "query" => Some(SettingField::SearchQuery),
            "fetchlimit" | "limit" => Some(SettingField::FetchLimit),
            "fetchoffset" | "offset" => Some(SettingField::FetchOffset),
            "destinationpath" | "destination" => Some(SettingField::DestinationPath),
            "updateintervalminutes" | "updateinterval" | "interval" => {
                Some(SettingField::UpdateIntervalMinutes)
            }
            _ => None,
        }
    }
}
