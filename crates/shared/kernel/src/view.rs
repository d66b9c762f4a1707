//! Base view-model: loading and error tracking for UI-driven async work.
//!
//! A [`ViewStore`] is `!Send`. It lives on the UI execution context (the shell's
//! current-thread runtime) and cannot be moved off it. Observers on other tasks
//! follow it through [`ViewStore::subscribe`].

use async_trait::async_trait;
use std::cell::Cell;
use std::error::Error;
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::rc::Rc;
use tokio::sync::watch;
use tracing::warn;

/// The recorded form of a failed operation: its message and the messages of its
/// source chain, outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSnapshot {
    message: String,
    chain: Vec<String>,
}

impl ErrorSnapshot {
    pub fn capture(err: &(dyn Error + 'static)) -> Self {
        let mut chain = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }
        Self { message: err.to_string(), chain }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn chain(&self) -> &[String] {
        &self.chain
    }

    /// Whether this snapshot was taken from an error equal in rendering to `err`.
    #[must_use]
    pub fn describes(&self, err: &(dyn Error + 'static)) -> bool {
        *self == Self::capture(err)
    }
}

impl fmt::Display for ErrorSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        for cause in &self.chain {
            write!(f, ": {cause}")?;
        }
        Ok(())
    }
}

/// Observable state of a view-model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub is_loading: bool,
    pub error: Option<ErrorSnapshot>,
}

/// Loading flag and last error of one view-model.
#[derive(Debug)]
pub struct ViewStore {
    state: watch::Sender<ViewState>,
    in_flight: Cell<usize>,
    _ui: PhantomData<Rc<()>>,
}

impl Default for ViewStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewStore {
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(ViewState::default());
        Self { state, in_flight: Cell::new(0), _ui: PhantomData }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    #[must_use]
    pub fn error(&self) -> Option<ErrorSnapshot> {
        self.state.borrow().error.clone()
    }

    #[must_use]
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Follows state changes from anywhere, including other threads.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Clears the recorded error; the loading flag is left alone.
    pub fn clear_error(&self) {
        self.state.send_if_modified(|state| state.error.take().is_some());
    }

    /// Runs `op` while the store reports loading.
    ///
    /// Clears any previous error before starting. On failure the error is recorded
    /// as an [`ErrorSnapshot`] and returned unchanged. Loading stays on while any
    /// wrapped operation is still running and is cleared when the last one ends,
    /// including when its future is dropped early.
    ///
    /// # Errors
    /// Returns the error produced by `op`.
    pub async fn with_loading<T, E, Fut>(&self, op: Fut) -> Result<T, E>
    where
        Fut: Future<Output = Result<T, E>>,
        E: Error + 'static,
    {
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
        });
        let _loading = LoadingGuard::enter(self);

        op.await.inspect_err(|err| {
            let snapshot = ErrorSnapshot::capture(err);
            warn!(error = %snapshot, "View operation failed");
            self.state.send_modify(|state| state.error = Some(snapshot));
        })
    }
}

struct LoadingGuard<'a> {
    store: &'a ViewStore,
}

impl<'a> LoadingGuard<'a> {
    fn enter(store: &'a ViewStore) -> Self {
        store.in_flight.set(store.in_flight.get() + 1);
        Self { store }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let remaining = self.store.in_flight.get().saturating_sub(1);
        self.store.in_flight.set(remaining);
        if remaining == 0 {
            self.store.state.send_modify(|state| state.is_loading = false);
        }
    }
}

/// A presentation-layer model driven by view lifecycle events.
///
/// Implementors own a [`ViewStore`]; the hooks default to doing nothing.
#[async_trait(?Send)]
pub trait ViewModel {
    fn store(&self) -> &ViewStore;

    /// Called when the view becomes visible.
    async fn on_view_appear(&self) {}

    /// Called when the view is hidden.
    async fn on_view_disappear(&self) {}

    fn is_loading(&self) -> bool {
        self.store().is_loading()
    }

    fn error(&self) -> Option<ErrorSnapshot> {
        self.store().error()
    }

    fn clear_error(&self) {
        self.store().clear_error();
    }
}
