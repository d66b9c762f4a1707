use async_trait::async_trait;
use fxhash::FxHashMap;
use parking_lot::Mutex;
use thw_kernel::{StorageCapability, StorageFailure};

/// Process-local storage; everything is lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<FxHashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }
}

#[async_trait]
impl StorageCapability for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn load_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, StorageFailure> {
        Ok(self.values.lock().get(key).cloned())
    }

    async fn save_bytes(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageFailure> {
        self.values.lock().insert(key.to_owned(), bytes);
        Ok(())
    }
}
