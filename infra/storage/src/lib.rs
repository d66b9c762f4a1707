//! # Storage
//!
//! A small key/value file store backing Thriftwood's persisted settings.
//!
//! * **Validated keys**: [`StorageKey`] admits only file-name-safe ASCII, so a key
//!   can never escape the root directory.
//! * **Atomic writes**: unique temp file, `fsync`, then `rename` over the target.
//! * **Optional LZ4**: every value carries a one-byte codec header and stays
//!   readable after the compression setting changes.
//! * **Self-healing**: stale temp files from interrupted writes are purged on connect.
//!
//! ```rust
//! use thw_storage::{Storage, StorageError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), StorageError> {
//!     # let tmp = tempfile::tempdir().unwrap();
//!     let storage = Storage::builder().root(tmp.path()).connect().await?;
//!
//!     assert!(matches!(
//!         storage.read("app_settings").await,
//!         Err(StorageError::KeyNotFound { .. })
//!     ));
//!
//!     storage.write("app_settings", b"{}").await?;
//!     assert_eq!(storage.keys().await?.len(), 1);
//!     Ok(())
//! }
//! ```

mod builder;
mod engine;
mod error;
mod key;
mod maintenance;

pub use builder::{NoRoot, StorageBuilder, WithRoot};
pub use engine::{Compression, Storage};
pub use error::{StorageError, StorageErrorExt};
pub use key::{MAX_KEY_LEN, StorageKey};
