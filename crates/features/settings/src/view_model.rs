use crate::error::SettingsError;
use crate::repository::SettingsRepository;
use async_trait::async_trait;
use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;
use thw_domain::settings::{AppSettings, Theme};
use thw_kernel::{ViewModel, ViewStore};
use tokio::sync::Mutex;

/// Presents and edits [`AppSettings`].
///
/// Every setter persists immediately; the in-memory copy only changes once the
/// save succeeded. Loads and edits run one at a time in call order, so an edit
/// always starts from the result of the one before it.
pub struct SettingsViewModel {
    repository: Arc<dyn SettingsRepository>,
    settings: RefCell<AppSettings>,
    edits: Mutex<()>,
    store: ViewStore,
}

impl SettingsViewModel {
    pub fn new(repository: Arc<dyn SettingsRepository>) -> Self {
        Self {
            repository,
            settings: RefCell::new(AppSettings::default()),
            edits: Mutex::new(()),
            store: ViewStore::new(),
        }
    }

    #[must_use]
    pub fn settings(&self) -> AppSettings {
        self.settings.borrow().clone()
    }

    /// # Errors
    /// Repository failures, also recorded in the store.
    pub async fn load(&self) -> Result<(), SettingsError> {
        let _edit = self.edits.lock().await;
        let settings = self.store.with_loading(self.repository.load_settings()).await?;
        self.settings.replace(settings);
        Ok(())
    }

    /// # Errors
    /// Repository failures, also recorded in the store.
    pub async fn set_theme(&self, theme: Theme) -> Result<(), SettingsError> {
        self.update(|s| s.theme = theme).await
    }

    /// # Errors
    /// Repository failures, also recorded in the store.
    pub async fn set_notifications(&self, enabled: bool) -> Result<(), SettingsError> {
        self.update(|s| s.notifications = enabled).await
    }

    /// # Errors
    /// Repository failures, also recorded in the store.
    pub async fn set_analytics_enabled(&self, enabled: bool) -> Result<(), SettingsError> {
        self.update(|s| s.analytics_enabled = enabled).await
    }

    /// Saves `settings` as a whole.
    ///
    /// # Errors
    /// Repository failures, also recorded in the store.
    pub async fn apply(&self, settings: AppSettings) -> Result<(), SettingsError> {
        let _edit = self.edits.lock().await;
        self.persist(settings).await
    }

    async fn update(&self, edit: impl FnOnce(&mut AppSettings)) -> Result<(), SettingsError> {
        let _edit = self.edits.lock().await;
        let mut next = self.settings();
        edit(&mut next);
        self.persist(next).await
    }

    async fn persist(&self, settings: AppSettings) -> Result<(), SettingsError> {
        self.store.with_loading(self.repository.save_settings(&settings)).await?;
        self.settings.replace(settings);
        Ok(())
    }
}

impl fmt::Debug for SettingsViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsViewModel")
            .field("settings", &self.settings)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

#[async_trait(?Send)]
impl ViewModel for SettingsViewModel {
    fn store(&self) -> &ViewStore {
        &self.store
    }

    async fn on_view_appear(&self) {
        let _ = self.load().await;
    }
}
