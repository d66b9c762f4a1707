use async_trait::async_trait;
use thw_kernel::{NetworkCapability, NetworkError};
use tracing::debug;

/// Network capability for builds without service backends: always offline.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineNetwork;

#[async_trait]
impl NetworkCapability for OfflineNetwork {
    fn name(&self) -> &str {
        "offline"
    }

    fn is_available(&self) -> bool {
        false
    }

    async fn get(&self, endpoint: &str) -> Result<Vec<u8>, NetworkError> {
        debug!(endpoint, "Request refused while offline");
        Err(NetworkError::Unavailable {
            message: endpoint.to_owned().into(),
            context: Some("No service backend is configured".into()),
        })
    }
}
