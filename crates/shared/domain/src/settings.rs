use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Storage key the application settings are persisted under.
pub const SETTINGS_KEY: &str = "app_settings";

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

/// User-facing application preferences.
///
/// Fields missing from a persisted record fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub theme: Theme,
    pub notifications: bool,
    pub analytics_enabled: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self { theme: Theme::System, notifications: true, analytics_enabled: false }
    }
}
