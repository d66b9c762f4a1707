use serde::Deserialize;
use std::path::PathBuf;
use strum_macros::{Display, EnumString};

/// Top-level configuration of a Thriftwood process.
///
/// Every field has a default, so an empty (or missing) config file is valid.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub runtime: RuntimeSection,
}

/// Backing store of the storage capability.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    /// Keep everything in memory; nothing survives the process.
    pub in_memory: bool,
    /// LZ4-compress persisted values.
    pub compression: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Enables rolling file logs in this directory.
    pub directory: Option<PathBuf>,
    pub json: bool,
}

/// Which async runtime the process runs on.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RuntimeSection {
    pub profile: RuntimeProfile,
}

/// Named runtime profile.
///
/// View-models are driven on the thread that starts the runtime under either
/// profile; `Background` only adds worker threads for spawned tasks.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RuntimeProfile {
    /// Single-threaded UI context.
    #[default]
    Interactive,
    /// Multi-threaded pool.
    Background,
}

// --- Default ---

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from("data"), in_memory: false, compression: false }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), directory: None, json: false }
    }
}
