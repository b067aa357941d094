//! Example extension: registers two settings and reads one of them back.

use super::{SettingDefinition, SettingsHost, SettingsRegistration};
use crate::error::SettingsResult;

/// Name the example extension registers under.
pub const EXAMPLE_EXTENSION: &str = "example-extension";

/// Settings declared by the example extension.
pub fn example_settings() -> SettingsRegistration {
    SettingsRegistration::new(
        EXAMPLE_EXTENSION,
        vec![
            SettingDefinition::new("theme", "Theme", "Preferred UI theme", "light")
                .with_values(["light", "dark"]),
            SettingDefinition::new("username", "Username", "Name shown in logs", ""),
        ],
    )
}

/// Register the example extension's settings with `host`.
///
/// When the theme is `dark`, the username is switched to `dark-mode-user`.
/// Returns the theme that was read.
pub fn activate(host: &dyn SettingsHost) -> SettingsResult<String> {
    host.register(example_settings());

    let theme = host.get_setting(EXAMPLE_EXTENSION, "theme", "light");
    if theme == "dark" {
        host.set_setting(EXAMPLE_EXTENSION, "username", "dark-mode-user")?;
    }
    Ok(theme)
}
