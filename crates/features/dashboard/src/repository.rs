use crate::error::DashboardError;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thw_domain::dashboard::{DashboardComposition, ModuleDescriptor};
use thw_kernel::{NetworkCapability, StorageCapability};
use tracing::debug;

pub const DASHBOARD_TITLE: &str = "Thriftwood Dashboard";

/// Source of the dashboard composition.
#[async_trait]
pub trait DashboardRepository: Send + Sync {
    /// Builds a fresh composition.
    ///
    /// # Errors
    /// Backends that talk to the network report failures as [`DashboardError::Network`].
    async fn fetch_dashboard_data(&self) -> Result<DashboardComposition, DashboardError>;
}

/// Fixed composition used until service backends are wired.
///
/// Holds the injected capabilities so the constructor matches the networked
/// implementation; it never calls them.
pub struct MockDashboardRepository {
    network: Arc<dyn NetworkCapability>,
    storage: Arc<dyn StorageCapability>,
}

impl MockDashboardRepository {
    pub fn new(network: Arc<dyn NetworkCapability>, storage: Arc<dyn StorageCapability>) -> Self {
        Self { network, storage }
    }
}

impl fmt::Debug for MockDashboardRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockDashboardRepository")
            .field("network", &self.network.name())
            .field("storage", &self.storage.name())
            .finish()
    }
}

#[async_trait]
impl DashboardRepository for MockDashboardRepository {
    async fn fetch_dashboard_data(&self) -> Result<DashboardComposition, DashboardError> {
        debug!(
            network = self.network.name(),
            online = self.network.is_available(),
            storage = self.storage.name(),
            "Composing mock dashboard"
        );

        Ok(DashboardComposition::new(
            DASHBOARD_TITLE,
            vec![
                ModuleDescriptor::new("sonarr", "Sonarr", true),
                ModuleDescriptor::new("radarr", "Radarr", true),
                ModuleDescriptor::new("lidarr", "Lidarr", false),
                ModuleDescriptor::new("overseerr", "Overseerr", true),
            ],
        ))
    }
}
