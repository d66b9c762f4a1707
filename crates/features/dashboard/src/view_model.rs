use crate::error::DashboardError;
use crate::repository::DashboardRepository;
use async_trait::async_trait;
use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;
use thw_domain::dashboard::{DashboardComposition, ModuleDescriptor};
use thw_kernel::{ViewModel, ViewStore};

/// Presents the dashboard composition; loads it whenever the view appears.
pub struct DashboardViewModel {
    repository: Arc<dyn DashboardRepository>,
    composition: RefCell<Option<DashboardComposition>>,
    store: ViewStore,
}

impl DashboardViewModel {
    pub fn new(repository: Arc<dyn DashboardRepository>) -> Self {
        Self { repository, composition: RefCell::new(None), store: ViewStore::new() }
    }

    /// Fetches the composition. The previous one stays visible if this fails.
    ///
    /// # Errors
    /// Repository failures, also recorded in the store.
    pub async fn load(&self) -> Result<(), DashboardError> {
        let composition =
            self.store.with_loading(self.repository.fetch_dashboard_data()).await?;
        self.composition.replace(Some(composition));
        Ok(())
    }

    #[must_use]
    pub fn composition(&self) -> Option<DashboardComposition> {
        self.composition.borrow().clone()
    }

    /// Enabled modules of the last loaded composition, in display order.
    #[must_use]
    pub fn enabled_modules(&self) -> Vec<ModuleDescriptor> {
        self.composition
            .borrow()
            .as_ref()
            .map(|c| c.enabled_modules().cloned().collect())
            .unwrap_or_default()
    }
}

impl fmt::Debug for DashboardViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardViewModel")
            .field("composition", &self.composition)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

#[async_trait(?Send)]
impl ViewModel for DashboardViewModel {
    fn store(&self) -> &ViewStore {
        &self.store
    }

    async fn on_view_appear(&self) {
        // Failures are recorded in the store for the view to show.
        let _ = self.load().await;
    }
}
