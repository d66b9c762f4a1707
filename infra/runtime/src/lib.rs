//! # Runtime
//!
//! Tokio runtime profiles used by every Thriftwood binary.
//!
//! ## Profiles
//! * **Interactive**: a current-thread runtime. Everything spawned onto it with
//!   `spawn_local` or driven by `block_on` stays on the thread that owns the UI,
//!   so `!Send` view state can be mutated without locks.
//! * **Background**: a multi-threaded runtime for headless work (sync jobs, tests
//!   that hammer the container from many tasks).
//!
//! ## Example
//!
//! ```rust,ignore
//! #[thw_runtime::main(interactive)]
//! async fn main() -> anyhow::Result<()> {
//!     Ok(())
//! }
//! ```

mod error;

pub use crate::error::{RuntimeError, RuntimeErrorExt};
pub use thw_derive::main;

use std::{sync::OnceLock, thread::available_parallelism, time::Duration};
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

/// Worker count used when the hardware cannot be queried.
const DEFAULT_WORKER_THREADS: usize = 4;
/// Upper bound for `TOKIO_WORKER_THREADS` and explicit overrides.
const MAX_WORKER_THREADS: usize = 256;
const DEFAULT_STACK_SIZE: usize = 2 * 1024 * 1024;
const MIN_STACK_SIZE: usize = 512 * 1024;
const MAX_STACK_SIZE: usize = 16 * 1024 * 1024;
const THREAD_KEEP_ALIVE: Duration = Duration::from_secs(30);

static WORKER_THREADS: OnceLock<usize> = OnceLock::new();

fn detected_worker_threads() -> usize {
    *WORKER_THREADS.get_or_init(|| {
        std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|&n| n > 0 && n <= MAX_WORKER_THREADS)
            .unwrap_or_else(|| {
                available_parallelism().map(std::num::NonZero::get).unwrap_or(DEFAULT_WORKER_THREADS)
            })
    })
}

/// Scheduler flavor of a runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    /// Single thread; the caller's thread drives every task.
    CurrentThread,
    /// Work-stealing pool of `worker_threads`.
    MultiThread,
}

/// Configuration for a Tokio runtime.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub flavor: Flavor,
    pub worker_threads: usize,
    pub stack_size: usize,
    pub thread_name: String,
    pub thread_keep_alive: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::background()
    }
}

impl RuntimeConfig {
    /// The UI-confined context: one thread, blocking-pool threads named after the UI.
    #[must_use = "Use this configuration for the UI-confined runtime"]
    pub fn interactive() -> Self {
        Self {
            flavor: Flavor::CurrentThread,
            worker_threads: 1,
            stack_size: DEFAULT_STACK_SIZE,
            thread_name: "thw-ui".to_owned(),
            thread_keep_alive: THREAD_KEEP_ALIVE,
        }
    }

    /// Multi-threaded pool sized from `TOKIO_WORKER_THREADS` or the hardware.
    #[must_use = "Use this configuration for background work"]
    pub fn background() -> Self {
        Self {
            flavor: Flavor::MultiThread,
            worker_threads: detected_worker_threads(),
            stack_size: DEFAULT_STACK_SIZE,
            thread_name: "thw-worker".to_owned(),
            thread_keep_alive: THREAD_KEEP_ALIVE,
        }
    }

    #[must_use = "Customize the number of worker threads for the runtime"]
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads.clamp(1, MAX_WORKER_THREADS);
        self
    }

    #[must_use = "Customize the stack size for worker threads"]
    pub fn with_stack_size(mut self, size: usize) -> Self {
        self.stack_size = size.clamp(MIN_STACK_SIZE, MAX_STACK_SIZE);
        self
    }

    #[must_use = "Customize the thread name"]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.trim().is_empty() {
            self.thread_name = name;
        }
        self
    }
}

/// Builds a runtime from `config`.
///
/// Out-of-range values are clamped rather than rejected; the current-thread flavor
/// ignores `worker_threads`.
///
/// # Errors
///
/// Returns [`RuntimeError::Build`] if the operating system refuses to create the
/// runtime's threads or I/O driver.
pub fn build_runtime(config: &RuntimeConfig) -> Result<Runtime, RuntimeError> {
    debug!(config = ?config, "Building tokio runtime");

    let mut builder = match config.flavor {
        Flavor::CurrentThread => Builder::new_current_thread(),
        Flavor::MultiThread => {
            let mut builder = Builder::new_multi_thread();
            builder.worker_threads(config.worker_threads.clamp(1, MAX_WORKER_THREADS));
            builder
        },
    };

    builder
        .thread_name(&config.thread_name)
        .thread_stack_size(config.stack_size.clamp(MIN_STACK_SIZE, MAX_STACK_SIZE))
        .thread_keep_alive(config.thread_keep_alive)
        .enable_time();

    builder.build().context(format!("Failed to build {:?} runtime", config.flavor))
}
