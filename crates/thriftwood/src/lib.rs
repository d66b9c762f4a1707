//! Facade crate for Thriftwood.
//! Re-exports the domain and kernel, provides the concrete capability adapters and
//! wires everything into one [`Container`] at start-up.
//! Keep this crate thin: it composes other crates, it does not implement features.
//!
//! ## Usage
//! ```rust
//! # async fn run() -> Result<(), thriftwood::BootstrapError> {
//! use thriftwood::domain::config::AppConfig;
//!
//! let mut config = AppConfig::default();
//! config.storage.in_memory = true;
//!
//! let container = thriftwood::bootstrap(&config).await?;
//! assert!(container.contains::<dyn thriftwood::kernel::StorageCapability>());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
mod error;

pub use error::{BootstrapError, BootstrapErrorExt};
pub use thw_domain as domain;
pub use thw_kernel as kernel;
pub use thw_kernel::Container;

use adapters::{FileStore, MemoryStore, OfflineNetwork};
use std::sync::Arc;
use thw_domain::config::StorageConfig;
use thw_kernel::{NetworkCapability, StorageCapability};
use thw_storage::{Compression, Storage};
use tracing::info;

/// Feature crates compiled into this build.
pub mod features {
    #[cfg(feature = "dashboard")]
    pub use thw_dashboard as dashboard;
    #[cfg(feature = "settings")]
    pub use thw_settings as settings;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "dashboard")]
        "dashboard",
        #[cfg(feature = "settings")]
        "settings",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Builds the application container.
///
/// Registers the storage and network capabilities as singletons, then lets every
/// enabled feature register its repositories.
///
/// # Errors
/// * [`BootstrapError::Storage`] if the storage backend cannot be opened.
/// * [`BootstrapError::Container`] if a feature repository cannot be resolved.
pub async fn bootstrap(config: &thw_domain::config::AppConfig) -> Result<Container, BootstrapError> {
    let container = Container::new();

    let storage = open_storage(&config.storage).await?;
    container.register_instance::<dyn StorageCapability>(storage);
    container.register_instance::<dyn NetworkCapability>(Arc::new(OfflineNetwork));

    #[cfg(feature = "dashboard")]
    thw_dashboard::register(&container);
    #[cfg(feature = "settings")]
    thw_settings::register(&container);

    verify(&container)?;

    info!(
        capabilities = container.len(),
        features = ?features::ENABLED,
        "Container bootstrapped"
    );
    Ok(container)
}

/// Resolves every feature repository once so wiring mistakes surface at start-up.
#[cfg_attr(not(any(feature = "dashboard", feature = "settings")), allow(unused_variables))]
fn verify(container: &Container) -> Result<(), BootstrapError> {
    #[cfg(feature = "dashboard")]
    container
        .resolve::<dyn thw_dashboard::DashboardRepository>()
        .context("Dashboard repository")?;
    #[cfg(feature = "settings")]
    container.resolve::<dyn thw_settings::SettingsRepository>().context("Settings repository")?;
    Ok(())
}

async fn open_storage(config: &StorageConfig) -> Result<Arc<dyn StorageCapability>, BootstrapError> {
    if config.in_memory {
        return Ok(Arc::new(MemoryStore::new()));
    }

    let compression = if config.compression { Compression::Lz4 } else { Compression::None };
    let storage = Storage::builder()
        .root(&config.data_dir)
        .compression(compression)
        .connect()
        .await
        .context(format!("Opening {}", config.data_dir.display()))?;

    Ok(Arc::new(FileStore::new(storage)))
}
