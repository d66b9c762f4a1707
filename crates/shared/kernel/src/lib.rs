//! Kernel shared by every Thriftwood feature.
//!
//! * [`Container`]: the capability registry and resolver. One instance is built at
//!   start-up and passed explicitly to whoever needs it.
//! * [`capability`]: the storage and network interfaces repositories are built on.
//! * [`view`]: the base view-model with loading and error tracking.
//! * [`config`]: layered configuration loading.
//!
//! ```rust
//! use std::sync::Arc;
//! use thw_kernel::{Container, ContainerError};
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! struct English;
//! impl Greeter for English {
//!     fn greet(&self) -> String {
//!         "hello".to_owned()
//!     }
//! }
//!
//! # fn main() -> Result<(), ContainerError> {
//! let container = Container::new();
//! container.register_singleton::<dyn Greeter, _>(|_| {
//!     let greeter: Arc<dyn Greeter> = Arc::new(English);
//!     Ok(greeter)
//! })?;
//!
//! assert_eq!(container.resolve::<dyn Greeter>()?.greet(), "hello");
//! # Ok(())
//! # }
//! ```

pub mod capability;
pub mod config;
pub mod container;
pub mod error;
pub mod view;

pub use capability::{
    NetworkCapability, NetworkError, NetworkErrorExt, StorageCapability, StorageCapabilityExt,
    StorageFailure, StorageFailureExt,
};
pub use container::{Container, Lifetime};
pub use error::{ContainerError, ContainerErrorExt};
pub use view::{ErrorSnapshot, ViewModel, ViewState, ViewStore};

pub use thw_domain as domain;
