//! Integration-level unit tests for the SettingsEngine public API.
//!
//! These tests exercise the SettingsEngine through its public trait interface,
//! validating default merging, write-through persistence, and the numeric guard.

use linkding_sync::services::settings_engine::{
    JsonFileStore, MemoryStore, SettingsEngine, SettingsEngineTrait,
};
use linkding_sync::types::settings::{SettingField, SyncSettings};
use rstest::rstest;
use serde_json::json;
use tempfile::TempDir;

/// Helper: create a SettingsEngine backed by a temp directory that lives for the
/// duration of the test (the caller holds the `TempDir` handle).
fn engine_in_temp(dir: &TempDir) -> SettingsEngine {
    let path = dir
        .path()
        .join("settings.json")
        .to_string_lossy()
        .to_string();
    SettingsEngine::new(Box::new(JsonFileStore::new(Some(path))))
}

#[test]
fn test_load_defaults_when_no_config_file_exists() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let settings = engine.load().unwrap();

    assert_eq!(settings, SyncSettings::default());
    assert_eq!(settings.instance_url, "http://192.168.50.203:9090");
    assert_eq!(settings.destination_path, "notes/linkdingnotes");
    assert_eq!(settings.update_interval_minutes, 30);
    assert_eq!(settings.fetch_limit, 100);
    assert_eq!(settings.fetch_offset, 0);
    assert_eq!(settings.api_key, "");
    assert_eq!(settings.search_query, "");
}

/// Stored fields override their defaults one by one; the rest keep defaults.
#[test]
fn test_partial_settings_file_merges_over_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("settings.json"),
        r#"{"apiKey": "abc123", "fetchLimit": 10}"#,
    )
    .unwrap();

    let mut engine = engine_in_temp(&dir);
    let settings = engine.load().unwrap();

    assert_eq!(settings.api_key, "abc123");
    assert_eq!(settings.fetch_limit, 10);
    assert_eq!(settings.instance_url, SyncSettings::DEFAULT_INSTANCE_URL);
    assert_eq!(settings.update_interval_minutes, 30);
}

/// Every edit is written through, so a fresh engine on the same file sees it.
/// A value of the wrong type costs only that field; the file still loads and can be repaired.
#[test]
fn test_mistyped_stored_field_falls_back_to_default() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("settings.json"),
        r#"{"apiKey": "abc123", "fetchLimit": "50", "updateIntervalMinutes": -1}"#,
    )
    .unwrap();

    let mut engine = engine_in_temp(&dir);
    let settings = engine.load().unwrap();
    assert_eq!(settings.api_key, "abc123");
    assert_eq!(settings.fetch_limit, 100);
    assert_eq!(settings.update_interval_minutes, 30);

    engine.set_field(SettingField::FetchLimit, "50").unwrap();
    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("settings.json")).unwrap())
            .unwrap();
    assert_eq!(saved["fetchLimit"], json!(50));
    assert_eq!(saved["updateIntervalMinutes"], json!(30));
}

#[test]
fn test_set_field_persists_changes() {
    let dir = TempDir::new().unwrap();

    {
        let mut engine = engine_in_temp(&dir);
        engine.load().unwrap();
        engine
            .set_field(SettingField::InstanceUrl, "https://links.example.com")
            .unwrap();
    }

    {
        let mut engine2 = engine_in_temp(&dir);
        let loaded = engine2.load().unwrap();
        assert_eq!(loaded.instance_url, "https://links.example.com");
    }
}

/// The saved file holds the complete object under the storage keys.
#[test]
fn test_saved_file_uses_storage_keys() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();
    engine.set_field(SettingField::SearchQuery, "rust").unwrap();

    let raw = std::fs::read_to_string(dir.path().join("settings.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        json!({
            "instanceURL": "http://192.168.50.203:9090",
            "apiKey": "",
            "destinationPath": "notes/linkdingnotes",
            "updateIntervalMinutes": 30,
            "searchQuery": "rust",
            "fetchLimit": 100,
            "fetchOffset": 0
        })
    );
}

/// Non-numeric input resets the edited field to its default, leaves every other
/// field alone, and names the field and fallback in the notice.
#[rstest]
#[case(SettingField::FetchLimit, "abc", "Results Limit must be a positive number. Defaulting to 100")]
#[case(SettingField::FetchOffset, "abc", "Offset must be a positive number. Defaulting to 0")]
#[case(SettingField::UpdateIntervalMinutes, "soon", "Update Interval must be a positive number. Defaulting to 30")]
#[case(SettingField::FetchLimit, "", "Results Limit must be a positive number. Defaulting to 100")]
#[case(SettingField::FetchLimit, "-5", "Results Limit must be a positive number. Defaulting to 100")]
#[case(SettingField::UpdateIntervalMinutes, "0", "Update Interval must be a positive number. Defaulting to 30")]
fn test_numeric_guard_resets_only_that_field(
    #[case] field: SettingField,
    #[case] input: &str,
    #[case] expected_notice: &str,
) {
    let store = MemoryStore::with_data(json!({
        "instanceURL": "https://links.example.com",
        "apiKey": "k",
        "destinationPath": "inbox.md",
        "updateIntervalMinutes": 7,
        "searchQuery": "q",
        "fetchLimit": 3,
        "fetchOffset": 9
    }));
    let mut engine = SettingsEngine::new(Box::new(store.clone()));
    let before = engine.load().unwrap();

    let update = engine.set_field(field, input).unwrap();
    assert_eq!(update.notice.as_deref(), Some(expected_notice));

    let mut expected = before.clone();
    match field {
        SettingField::FetchLimit => expected.fetch_limit = 100,
        SettingField::FetchOffset => expected.fetch_offset = 0,
        _ => expected.update_interval_minutes = 30,
    }
    assert_eq!(*engine.get_settings(), expected);

    // The reset value is persisted as well.
    let saved = store.snapshot().unwrap();
    assert_eq!(saved[field.storage_key()], json!(match field {
        SettingField::FetchLimit => 100,
        SettingField::FetchOffset => 0,
        _ => 30,
    }));
}

/// Leading digits are enough, as with the original numeric inputs.
#[rstest]
#[case("50", 50)]
#[case(" 15 ", 15)]
#[case("20 items", 20)]
fn test_numeric_input_uses_leading_integer(#[case] input: &str, #[case] expected: u64) {
    let mut engine = SettingsEngine::new(Box::new(MemoryStore::new()));
    engine.load().unwrap();

    let update = engine.set_field(SettingField::FetchLimit, input).unwrap();
    assert!(update.notice.is_none());
    assert_eq!(engine.get_settings().fetch_limit, expected);
}

#[test]
fn test_reset_restores_defaults() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();
    engine.set_field(SettingField::ApiKey, "secret").unwrap();
    engine.set_field(SettingField::FetchOffset, "40").unwrap();

    engine.reset().unwrap();

    let mut engine2 = engine_in_temp(&dir);
    assert_eq!(engine2.load().unwrap(), SyncSettings::default());
}
