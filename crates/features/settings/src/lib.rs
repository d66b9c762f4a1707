//! Settings feature: application preferences persisted through the storage capability.

mod error;
mod repository;
mod view_model;

pub use error::{SettingsError, SettingsErrorExt};
pub use repository::{SettingsRepository, StoredSettingsRepository};
pub use view_model::SettingsViewModel;

use std::sync::Arc;
use thw_kernel::{Container, NetworkCapability, StorageCapability};

/// Registers [`SettingsRepository`] as a transient capability.
pub fn register(container: &Container) {
    container.register::<dyn SettingsRepository, _>(|c| {
        let network = c.resolve::<dyn NetworkCapability>()?;
        let storage = c.resolve::<dyn StorageCapability>()?;
        let repository: Arc<dyn SettingsRepository> =
            Arc::new(StoredSettingsRepository::new(network, storage));
        Ok(repository)
    });
    tracing::debug!("Settings feature registered");
}
