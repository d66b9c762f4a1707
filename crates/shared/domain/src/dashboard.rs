use serde::{Deserialize, Serialize};

/// The dashboard as shown to the user: a title and an ordered list of service modules.
///
/// Built fresh on every fetch and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardComposition {
    pub title: String,
    pub modules: Vec<ModuleDescriptor>,
}

impl DashboardComposition {
    pub fn new(title: impl Into<String>, modules: Vec<ModuleDescriptor>) -> Self {
        Self { title: title.into(), modules }
    }

    /// Modules the user has switched on, in display order.
    pub fn enabled_modules(&self) -> impl Iterator<Item = &ModuleDescriptor> {
        self.modules.iter().filter(|m| m.is_enabled)
    }

    #[must_use]
    pub fn module(&self, id: &str) -> Option<&ModuleDescriptor> {
        self.modules.iter().find(|m| m.id == id)
    }
}

/// One service entry on the dashboard (e.g. `sonarr`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDescriptor {
    pub id: String,
    pub name: String,
    pub is_enabled: bool,
}

impl ModuleDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, is_enabled: bool) -> Self {
        Self { id: id.into(), name: name.into(), is_enabled }
    }
}
