//! Dashboard feature: which service modules the user sees and in what order.

mod error;
mod repository;
mod view_model;

pub use error::{DashboardError, DashboardErrorExt};
pub use repository::{DASHBOARD_TITLE, DashboardRepository, MockDashboardRepository};
pub use view_model::DashboardViewModel;

use std::sync::Arc;
use thw_kernel::{Container, NetworkCapability, StorageCapability};

/// Registers [`DashboardRepository`] as a transient capability.
///
/// The factory resolves the network and storage capabilities on every resolution,
/// so both must be registered before the repository is first resolved.
pub fn register(container: &Container) {
    container.register::<dyn DashboardRepository, _>(|c| {
        let network = c.resolve::<dyn NetworkCapability>()?;
        let storage = c.resolve::<dyn StorageCapability>()?;
        let repository: Arc<dyn DashboardRepository> =
            Arc::new(MockDashboardRepository::new(network, storage));
        Ok(repository)
    });
    tracing::debug!("Dashboard feature registered");
}
