//! Interfaces repositories consume. Implementations live outside the kernel and are
//! registered in the [`Container`](crate::Container) as `dyn` trait objects.

mod network;
mod storage;

pub use network::{NetworkCapability, NetworkError, NetworkErrorExt};
pub use storage::{StorageCapability, StorageCapabilityExt, StorageFailure, StorageFailureExt};
