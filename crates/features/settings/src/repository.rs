use crate::error::{SettingsError, SettingsErrorExt};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thw_domain::settings::{AppSettings, SETTINGS_KEY};
use thw_kernel::{NetworkCapability, StorageCapability, StorageCapabilityExt};
use tracing::{debug, info};

/// Load and save of [`AppSettings`].
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Returns the persisted settings, or [`AppSettings::default`] if none were saved.
    ///
    /// # Errors
    /// Storage failures other than a missing key.
    async fn load_settings(&self) -> Result<AppSettings, SettingsError>;

    /// # Errors
    /// Any storage failure.
    async fn save_settings(&self, settings: &AppSettings) -> Result<(), SettingsError>;
}

/// Settings kept under [`SETTINGS_KEY`] in the storage capability.
pub struct StoredSettingsRepository {
    network: Arc<dyn NetworkCapability>,
    storage: Arc<dyn StorageCapability>,
}

impl StoredSettingsRepository {
    pub fn new(network: Arc<dyn NetworkCapability>, storage: Arc<dyn StorageCapability>) -> Self {
        Self { network, storage }
    }
}

impl fmt::Debug for StoredSettingsRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredSettingsRepository")
            .field("network", &self.network.name())
            .field("storage", &self.storage.name())
            .finish()
    }
}

#[async_trait]
impl SettingsRepository for StoredSettingsRepository {
    async fn load_settings(&self) -> Result<AppSettings, SettingsError> {
        let stored = self
            .storage
            .load::<AppSettings>(SETTINGS_KEY)
            .await
            .context(format!("Loading '{SETTINGS_KEY}' from {}", self.storage.name()))?;

        Ok(stored.unwrap_or_else(|| {
            debug!(storage = self.storage.name(), "No saved settings, using defaults");
            AppSettings::default()
        }))
    }

    async fn save_settings(&self, settings: &AppSettings) -> Result<(), SettingsError> {
        self.storage
            .save(settings, SETTINGS_KEY)
            .await
            .context(format!("Saving '{SETTINGS_KEY}' to {}", self.storage.name()))?;

        info!(
            theme = %settings.theme,
            notifications = settings.notifications,
            analytics = settings.analytics_enabled,
            online = self.network.is_available(),
            "Settings saved"
        );
        Ok(())
    }
}
