//! Core engine: one file per key under a canonical root, written atomically.

use crate::builder::StorageBuilder;
use crate::error::{StorageError, StorageErrorExt};
use crate::key::StorageKey;
use crate::maintenance;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// File extension of stored values.
pub(crate) const VALUE_EXT: &str = "thw";
/// Marker embedded in temporary file names; stale ones are purged on connect.
pub(crate) const TMP_MARKER: &str = ".thwtmp.";

const HEADER_RAW: u8 = 0;
const HEADER_LZ4: u8 = 1;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Compression {
    #[default]
    None,
    Lz4,
}

impl Compression {
    /// Encodes `data` behind a one-byte header naming the codec, so values written
    /// under one setting stay readable after the setting changes.
    fn encode(self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::None => {
                let mut out = Vec::with_capacity(data.len() + 1);
                out.push(HEADER_RAW);
                out.extend_from_slice(data);
                out
            },
            Self::Lz4 => {
                let compressed = lz4_flex::compress_prepend_size(data);
                let mut out = Vec::with_capacity(compressed.len() + 1);
                out.push(HEADER_LZ4);
                out.extend_from_slice(&compressed);
                out
            },
        }
    }

    fn decode(stored: &[u8], key: &StorageKey) -> Result<Vec<u8>, StorageError> {
        match stored.split_first() {
            Some((&HEADER_RAW, body)) => Ok(body.to_vec()),
            Some((&HEADER_LZ4, body)) => lz4_flex::decompress_size_prepended(body)
                .context(format!("Lz4 decompression failed for {key}")),
            Some((other, _)) => Err(StorageError::Io {
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("unknown value header {other:#04x}"),
                ),
                context: Some(format!("Corrupted value for {key}").into()),
            }),
            None => Err(StorageError::Io {
                source: std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "empty value file"),
                context: Some(format!("Corrupted value for {key}").into()),
            }),
        }
    }
}

/// The internal shared state of a [`Storage`] instance.
#[derive(Debug)]
pub(crate) struct StorageInner {
    /// Canonical physical directory holding every value file.
    pub(crate) root: PathBuf,
    pub(crate) compression: Compression,
    pub(crate) tmp_counter: AtomicU64,
}

/// A cheaply clonable handle to a key/value file store.
///
/// Each key is stored as `<root>/<key>.thw`. Writes go to a unique temporary file
/// that is synced and then renamed over the target, so a value is either the old or
/// the new content, never a torn write.
///
/// # Example
///
/// ```rust
/// use thw_storage::{Compression, Storage, StorageError};
///
/// #[tokio::main]
/// async fn main() -> Result<(), StorageError> {
///     # let tmp = tempfile::tempdir().unwrap();
///     let storage = Storage::builder()
///         .root(tmp.path().join("data"))
///         .compression(Compression::Lz4)
///         .connect()
///         .await?;
///
///     storage.write("app_settings", br#"{"theme":"dark"}"#).await?;
///     assert_eq!(storage.read("app_settings").await?, br#"{"theme":"dark"}"#);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Storage {
    pub(crate) inner: Arc<StorageInner>,
}

impl Storage {
    #[must_use = "The storage engine is not initialized until you call .connect()"]
    pub fn builder() -> StorageBuilder {
        StorageBuilder::new()
    }

    /// Canonical root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.inner.root
    }

    #[must_use]
    pub fn compression(&self) -> Compression {
        self.inner.compression
    }

    /// Physical path of `key`.
    ///
    /// # Errors
    /// Returns [`StorageError::InvalidKey`] if `key` is not a valid [`StorageKey`].
    pub fn path_of(&self, key: &str) -> Result<PathBuf, StorageError> {
        let key = StorageKey::try_from(key)?;
        Ok(self.value_path(&key))
    }

    fn value_path(&self, key: &StorageKey) -> PathBuf {
        self.inner.root.join(format!("{key}.{VALUE_EXT}"))
    }

    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// * [`StorageError::KeyNotFound`] if nothing is stored under `key`.
    /// * [`StorageError::InvalidKey`] for malformed keys.
    /// * [`StorageError::Decompress`] / [`StorageError::Io`] for corrupted or unreadable files.
    pub async fn read(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let key = StorageKey::try_from(key)?;
        let path = self.value_path(&key);

        let stored = match fs::read(&path).await {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::KeyNotFound { message: key.to_string().into(), context: None });
            },
            Err(err) => {
                return Err(StorageError::Io {
                    source: err,
                    context: Some(format!("Read failed: {}", path.display()).into()),
                });
            },
        };

        Compression::decode(&stored, &key)
    }

    /// Stores `data` under `key`, replacing any previous value atomically.
    ///
    /// # Errors
    ///
    /// * [`StorageError::InvalidKey`] for malformed keys.
    /// * [`StorageError::Io`] if the temporary file cannot be written, synced or renamed.
    pub async fn write(&self, key: &str, data: &[u8]) -> Result<(), StorageError> {
        let key = StorageKey::try_from(key)?;
        let target = self.value_path(&key);
        let temp = self.tmp_path(&key);
        let encoded = self.inner.compression.encode(data);

        if let Err(err) = write_temp(&temp, &encoded).await {
            discard(&temp).await;
            return Err(err);
        }
        if let Err(err) = self.swap(&temp, &target, &key).await {
            discard(&temp).await;
            return Err(err);
        }

        self.sync_root().await;

        debug!(key = %key, bytes = data.len(), "Value saved atomically");
        Ok(())
    }

    /// Removes the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::KeyNotFound`] if nothing is stored under `key`.
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let key = StorageKey::try_from(key)?;
        let path = self.value_path(&key);
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key = %key, "Value deleted");
                Ok(())
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::KeyNotFound { message: key.to_string().into(), context: None })
            },
            Err(err) => Err(StorageError::Io {
                source: err,
                context: Some(format!("Failed to delete: {}", path.display()).into()),
            }),
        }
    }

    /// Whether a value is stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] for malformed keys.
    pub async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        let key = StorageKey::try_from(key)?;
        fs::try_exists(self.value_path(&key)).await.context(format!("Failed to probe {key}"))
    }

    /// Lists every stored key, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the root directory cannot be listed.
    pub async fn keys(&self) -> Result<Vec<StorageKey>, StorageError> {
        let mut entries = fs::read_dir(&self.inner.root)
            .await
            .context(format!("Failed to list {}", self.inner.root.display()))?;

        let mut keys = Vec::new();
        while let Some(entry) = entries.next_entry().await.context("Failed to read entry")? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(VALUE_EXT) {
                continue;
            }
            if let Some(key) =
                path.file_stem().and_then(|stem| stem.to_str()).and_then(|s| StorageKey::try_from(s).ok())
            {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }

    /// Removes temporary files left behind by interrupted writes.
    pub async fn purge_tmp(&self) {
        maintenance::purge_tmp(&self.inner.root).await;
    }

    fn tmp_path(&self, key: &StorageKey) -> PathBuf {
        let counter = self.inner.tmp_counter.fetch_add(1, Ordering::Relaxed);
        self.inner.root.join(format!(".{key}{TMP_MARKER}{counter}"))
    }

    /// Renames `temp` over `target`. The previous value survives any failure.
    async fn swap(&self, temp: &Path, target: &Path, key: &StorageKey) -> Result<(), StorageError> {
        let err = match fs::rename(temp, target).await {
            Ok(()) => return Ok(()),
            Err(err) => err,
        };
        // Windows refuses to rename over an existing file.
        if err.kind() != std::io::ErrorKind::AlreadyExists {
            return Err(StorageError::Io {
                source: err,
                context: Some(format!("Atomic swap failed for {key}").into()),
            });
        }

        let previous = self.tmp_path(key);
        fs::rename(target, &previous)
            .await
            .context(format!("Failed to move aside: {}", target.display()))?;
        if let Err(err) = fs::rename(temp, target).await {
            if let Err(restore) = fs::rename(&previous, target).await {
                warn!(key = %key, error = %restore, "Failed to restore previous value");
            }
            return Err(StorageError::Io {
                source: err,
                context: Some(format!("Atomic swap failed for {key}").into()),
            });
        }
        discard(&previous).await;
        Ok(())
    }

    async fn sync_root(&self) {
        match fs::File::open(&self.inner.root).await {
            Ok(dir) => {
                if let Err(err) = dir.sync_all().await {
                    warn!(path = %self.inner.root.display(), error = %err, "Directory sync failed");
                }
            },
            Err(err) => {
                warn!(path = %self.inner.root.display(), error = %err, "Directory open failed");
            },
        }
    }
}

async fn write_temp(temp: &Path, encoded: &[u8]) -> Result<(), StorageError> {
    let mut file = fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(temp)
        .await
        .context(format!("Temp creation failed: {}", temp.display()))?;
    file.write_all(encoded).await.context("Write failed")?;
    file.sync_all().await.context("Hardware sync failed")
}

/// Best-effort removal of a temporary file.
async fn discard(path: &Path) {
    if let Err(err) = fs::remove_file(path).await
        && err.kind() != std::io::ErrorKind::NotFound
    {
        warn!(path = %path.display(), error = %err, "Failed to remove temporary file");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(raw: &str) -> StorageKey {
        StorageKey::try_from(raw).expect("valid key")
    }

    #[test]
    fn raw_values_round_trip_through_header() {
        let encoded = Compression::None.encode(b"abc");
        assert_eq!(encoded[0], HEADER_RAW);
        assert_eq!(Compression::decode(&encoded, &key("k")).ok(), Some(b"abc".to_vec()));
    }

    #[test]
    fn lz4_values_decode_without_knowing_the_setting() {
        let payload = vec![7u8; 2048];
        let encoded = Compression::Lz4.encode(&payload);
        assert_eq!(encoded[0], HEADER_LZ4);
        assert!(encoded.len() < payload.len());
        assert_eq!(Compression::decode(&encoded, &key("k")).ok(), Some(payload));
    }

    #[test]
    fn empty_and_unknown_headers_are_corruption() {
        assert!(matches!(Compression::decode(&[], &key("k")), Err(StorageError::Io { .. })));
        assert!(matches!(Compression::decode(&[9, 1, 2], &key("k")), Err(StorageError::Io { .. })));
    }
}
