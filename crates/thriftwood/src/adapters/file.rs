use async_trait::async_trait;
use thw_kernel::{StorageCapability, StorageFailure};
use thw_storage::{Storage, StorageError};

/// Storage capability persisted on disk through [`thw_storage`].
#[derive(Debug, Clone)]
pub struct FileStore {
    storage: Storage,
}

impl FileStore {
    #[must_use]
    pub const fn new(storage: Storage) -> Self {
        Self { storage }
    }

    #[must_use]
    pub const fn storage(&self) -> &Storage {
        &self.storage
    }
}

#[async_trait]
impl StorageCapability for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn load_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, StorageFailure> {
        match self.storage.read(key).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(StorageError::KeyNotFound { .. }) => Ok(None),
            Err(err) => Err(StorageFailure::backend(err)),
        }
    }

    async fn save_bytes(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageFailure> {
        self.storage.write(key, &bytes).await.map_err(StorageFailure::backend)
    }
}
