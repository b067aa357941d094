//! Integration tests for the extension settings host and the example extension.

use pi_extension_settings::config::{ConfigResolver, SettingsPaths};
use pi_extension_settings::extension::example::{self, EXAMPLE_EXTENSION};
use pi_extension_settings::SettingsError;
use pi_extension_settings::extension::{
    MemorySettingsHost, REGISTER_EVENT, SettingsHost, SettingsRegistration,
};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

/// Helper to create a host reading from temp settings files.
fn host_with_files(global: Option<&str>, project: Option<&str>) -> (TempDir, MemorySettingsHost) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let paths = SettingsPaths::new(temp.path().join("agent"), temp.path().join("project"));
    fs::create_dir_all(&paths.agent_dir).unwrap();
    fs::create_dir_all(paths.cwd.join(".pi")).unwrap();
    if let Some(content) = global {
        fs::write(paths.global_settings_path(), content).unwrap();
    }
    if let Some(content) = project {
        fs::write(paths.project_settings_path(), content).unwrap();
    }
    let host = MemorySettingsHost::new().with_resolver(ConfigResolver::new(paths));
    (temp, host)
}

#[test]
fn test_register_event_name() {
    assert_eq!(REGISTER_EVENT, "pi-extension-settings:register");
}

#[test]
fn test_registration_payload_from_json() {
    let payload = r#"{
        "name": "example-extension",
        "settings": [
            {
                "id": "theme",
                "label": "Theme",
                "description": "Preferred UI theme",
                "defaultValue": "light",
                "values": ["light", "dark"]
            },
            {
                "id": "username",
                "label": "Username",
                "description": "Name shown in logs",
                "defaultValue": ""
            }
        ]
    }"#;
    let registration: SettingsRegistration = serde_json::from_str(payload).unwrap();
    assert_eq!(registration, example::example_settings());
}

#[test]
fn test_example_with_no_files() {
    let (_temp, host) = host_with_files(None, None);
    let theme = example::activate(&host).unwrap();

    assert_eq!(theme, "light");
    assert_eq!(host.get_setting(EXAMPLE_EXTENSION, "username", "unset"), "");
    assert_eq!(host.extensions(), vec![EXAMPLE_EXTENSION.to_string()]);
    assert_eq!(
        host.registration(EXAMPLE_EXTENSION),
        Some(example::example_settings())
    );
}

#[test]
fn test_example_project_theme_overrides_global() {
    let (_temp, host) = host_with_files(
        Some(r#"{"example-extension": {"theme": "light", "username": "me"}}"#),
        Some(r#"{"example-extension": {"theme": "dark"}}"#),
    );
    let theme = example::activate(&host).unwrap();

    assert_eq!(theme, "dark");
    assert_eq!(
        host.get_setting(EXAMPLE_EXTENSION, "username", ""),
        "dark-mode-user"
    );
}

#[test]
fn test_example_ignores_disallowed_theme() {
    let (_temp, host) = host_with_files(
        Some(r#"{"example-extension": {"theme": "solarized", "username": "me"}}"#),
        None,
    );
    let theme = example::activate(&host).unwrap();

    assert_eq!(theme, "light");
    assert_eq!(host.get_setting(EXAMPLE_EXTENSION, "username", ""), "me");
}

#[test]
fn test_invalid_set_reports_allowed_values() {
    let host = MemorySettingsHost::new();
    host.register(example::example_settings());

    match host.set_setting(EXAMPLE_EXTENSION, "theme", "blue") {
        Err(SettingsError::InvalidValue { allowed, .. }) => {
            assert_eq!(allowed, vec!["light".to_string(), "dark".to_string()]);
        }
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

#[test]
fn test_host_shared_across_threads() {
    let host = Arc::new(MemorySettingsHost::new());
    host.register(example::example_settings());

    let handles: Vec<_> = ["light", "dark"]
        .into_iter()
        .map(|theme| {
            let host = Arc::clone(&host);
            std::thread::spawn(move || host.set_setting(EXAMPLE_EXTENSION, "theme", theme))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    let theme = host.get_setting(EXAMPLE_EXTENSION, "theme", "");
    assert!(theme == "light" || theme == "dark");
}
