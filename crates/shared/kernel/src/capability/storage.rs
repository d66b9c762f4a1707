use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::error::Error;

#[thw_derive::thw_error]
pub enum StorageFailure {
    #[error("Storage backend failure{}: {source}", format_context(.context))]
    Backend { source: Box<dyn Error + Send + Sync>, context: Option<Cow<'static, str>> },

    #[error("Value (de)serialization failed{}: {source}", format_context(.context))]
    Serialization { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Internal storage error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl StorageFailure {
    /// Wraps a backend-specific error.
    pub fn backend(err: impl Error + Send + Sync + 'static) -> Self {
        Self::Backend { source: Box::new(err), context: None }
    }
}

/// Byte-level key/value persistence.
///
/// A missing key is not an error: [`StorageCapability::load_bytes`] returns `Ok(None)`.
#[async_trait]
pub trait StorageCapability: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str;

    /// # Errors
    /// Any backend failure other than a missing key.
    async fn load_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, StorageFailure>;

    /// # Errors
    /// Any backend failure.
    async fn save_bytes(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageFailure>;
}

/// Typed access on top of [`StorageCapability`], encoding values as JSON.
#[async_trait]
pub trait StorageCapabilityExt: StorageCapability {
    /// Loads and decodes the value under `key`; `Ok(None)` when nothing is stored.
    ///
    /// # Errors
    /// Backend failures and [`StorageFailure::Serialization`] for undecodable values.
    async fn load<T>(&self, key: &str) -> Result<Option<T>, StorageFailure>
    where
        T: DeserializeOwned + Send,
    {
        match self.load_bytes(key).await? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .context(format!("Failed to decode value under '{key}'")),
            None => Ok(None),
        }
    }

    /// Encodes `value` and stores it under `key`.
    ///
    /// # Errors
    /// Backend failures and [`StorageFailure::Serialization`].
    async fn save<T>(&self, value: &T, key: &str) -> Result<(), StorageFailure>
    where
        T: Serialize + Sync,
    {
        let bytes =
            serde_json::to_vec(value).context(format!("Failed to encode value for '{key}'"))?;
        self.save_bytes(key, bytes).await
    }
}

impl<S: StorageCapability + ?Sized> StorageCapabilityExt for S {}
