use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use thriftwood::domain::config::AppConfig;
use thriftwood::domain::settings::Theme;

/// Unified dashboard for self-hosted media services.
#[derive(Debug, Parser)]
#[command(name = "thriftwood", version, about)]
pub(crate) struct Cli {
    /// Configuration file; `./thriftwood.toml` is used when present.
    #[arg(short, long, global = true)]
    pub(crate) config: Option<PathBuf>,

    /// Overrides `storage.data_dir`.
    #[arg(long, global = true)]
    pub(crate) data_dir: Option<PathBuf>,

    /// Keeps everything in memory; nothing is saved.
    #[arg(long, global = true)]
    pub(crate) in_memory: bool,

    /// Overrides `logging.level` (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub(crate) log_level: Option<String>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration.
    pub(crate) fn apply(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.data_dir {
            config.storage.data_dir.clone_from(dir);
        }
        if self.in_memory {
            config.storage.in_memory = true;
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
    }
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Shows the dashboard modules.
    Dashboard {
        /// Prints the composition as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Shows or changes application settings.
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Lists registered capabilities and enabled features.
    Capabilities,
}

#[derive(Debug, Subcommand)]
pub(crate) enum SettingsAction {
    Show {
        #[arg(long)]
        json: bool,
    },
    Set(SetArgs),
}

#[derive(Debug, Args)]
pub(crate) struct SetArgs {
    /// system, light or dark.
    #[arg(long)]
    pub(crate) theme: Option<Theme>,

    #[arg(long)]
    pub(crate) notifications: Option<bool>,

    #[arg(long)]
    pub(crate) analytics: Option<bool>,
}

impl SetArgs {
    pub(crate) const fn is_empty(&self) -> bool {
        self.theme.is_none() && self.notifications.is_none() && self.analytics.is_none()
    }
}
