use async_trait::async_trait;
use std::sync::Arc;
use thw_dashboard::{DashboardError, DashboardRepository};
use thw_domain::dashboard::DashboardComposition;
use thw_kernel::{
    Container, NetworkCapability, NetworkError, StorageCapability, StorageFailure,
};

pub struct NullNetwork;

#[async_trait]
impl NetworkCapability for NullNetwork {
    fn name(&self) -> &str {
        "null"
    }

    fn is_available(&self) -> bool {
        false
    }

    async fn get(&self, endpoint: &str) -> Result<Vec<u8>, NetworkError> {
        Err(NetworkError::Unavailable { message: endpoint.to_owned().into(), context: None })
    }
}

pub struct NullStorage;

#[async_trait]
impl StorageCapability for NullStorage {
    fn name(&self) -> &str {
        "null"
    }

    async fn load_bytes(&self, _key: &str) -> Result<Option<Vec<u8>>, StorageFailure> {
        Ok(None)
    }

    async fn save_bytes(&self, _key: &str, _bytes: Vec<u8>) -> Result<(), StorageFailure> {
        Ok(())
    }
}

/// Repository whose backend is always offline.
pub struct FailingDashboard;

#[async_trait]
impl DashboardRepository for FailingDashboard {
    async fn fetch_dashboard_data(&self) -> Result<DashboardComposition, DashboardError> {
        let body = NullNetwork.get("offline/dashboard").await?;
        Err(DashboardError::from(format!("unexpected body of {} bytes", body.len())))
    }
}

pub fn wired_container() -> Container {
    let container = Container::new();
    container.register_instance::<dyn NetworkCapability>(Arc::new(NullNetwork));
    container.register_instance::<dyn StorageCapability>(Arc::new(NullStorage));
    thw_dashboard::register(&container);
    container
}
