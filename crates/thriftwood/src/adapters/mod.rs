//! Concrete capability implementations.

mod file;
mod memory;
mod offline;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use offline::OfflineNetwork;
