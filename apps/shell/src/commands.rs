use crate::cli::{Command, SetArgs, SettingsAction};
use crate::render;
use anyhow::{Context, bail};
use serde::Serialize;
use std::io::Write;
use thriftwood::Container;
use thriftwood::features::dashboard::DashboardViewModel;
use thriftwood::features::settings::SettingsViewModel;
use thriftwood::kernel::ViewModel;
use tracing::debug;

/// Runs one command against a bootstrapped container, writing results to `out`.
pub(crate) async fn run(command: Command, container: &Container, out: &mut dyn Write) -> anyhow::Result<()> {
    debug!(?command, "Running command");
    match command {
        Command::Dashboard { json } => dashboard(container, json, out).await,
        Command::Settings { action: SettingsAction::Show { json } } => {
            show_settings(container, json, out).await
        },
        Command::Settings { action: SettingsAction::Set(args) } => {
            set_settings(container, args, out).await
        },
        Command::Capabilities => {
            render::capabilities(&container.capabilities(), thriftwood::features::ENABLED, out)?;
            Ok(())
        },
    }
}

async fn dashboard(container: &Container, json: bool, out: &mut dyn Write) -> anyhow::Result<()> {
    let vm = DashboardViewModel::new(container.resolve()?);
    vm.on_view_appear().await;
    if let Some(err) = vm.error() {
        bail!("Failed to load the dashboard: {err}");
    }

    let composition = vm.composition().context("Dashboard loaded without a composition")?;
    if json {
        write_json(&composition, out)?;
    } else {
        render::dashboard(&composition, out)?;
    }

    vm.on_view_disappear().await;
    Ok(())
}

async fn show_settings(container: &Container, json: bool, out: &mut dyn Write) -> anyhow::Result<()> {
    let vm = settings_view(container).await?;
    if json {
        write_json(&vm.settings(), out)?;
    } else {
        render::settings(&vm.settings(), out)?;
    }
    vm.on_view_disappear().await;
    Ok(())
}

async fn set_settings(container: &Container, args: SetArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    if args.is_empty() {
        bail!("Nothing to change; pass --theme, --notifications or --analytics");
    }

    let vm = settings_view(container).await?;
    if let Some(theme) = args.theme {
        vm.set_theme(theme).await?;
    }
    if let Some(enabled) = args.notifications {
        vm.set_notifications(enabled).await?;
    }
    if let Some(enabled) = args.analytics {
        vm.set_analytics_enabled(enabled).await?;
    }

    render::settings(&vm.settings(), out)?;
    vm.on_view_disappear().await;
    Ok(())
}

async fn settings_view(container: &Container) -> anyhow::Result<SettingsViewModel> {
    let vm = SettingsViewModel::new(container.resolve()?);
    vm.on_view_appear().await;
    if let Some(err) = vm.error() {
        bail!("Failed to load settings: {err}");
    }
    Ok(vm)
}

fn write_json(value: &impl Serialize, out: &mut dyn Write) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use thriftwood::domain::config::AppConfig;
    use thriftwood::domain::settings::Theme;

    async fn container() -> Container {
        let mut config = AppConfig::default();
        config.storage.in_memory = true;
        thriftwood::bootstrap(&config).await.unwrap()
    }

    async fn run_to_string(command: Command, container: &Container) -> anyhow::Result<String> {
        let mut out = Vec::new();
        run(command, container, &mut out).await?;
        Ok(String::from_utf8(out)?)
    }

    #[tokio::test]
    async fn dashboard_lists_every_module() {
        let container = container().await;
        let text = run_to_string(Command::Dashboard { json: false }, &container).await.unwrap();
        assert!(text.starts_with("Thriftwood Dashboard\n"));
        for id in ["sonarr", "radarr", "lidarr", "overseerr"] {
            assert!(text.contains(id), "{id} missing");
        }
    }

    #[tokio::test]
    async fn dashboard_json_uses_camel_case() {
        let container = container().await;
        let text = run_to_string(Command::Dashboard { json: true }, &container).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["modules"][2]["isEnabled"], false);
    }

    #[tokio::test]
    async fn settings_set_then_show() {
        let container = container().await;
        let set = SetArgs { theme: Some(Theme::Light), notifications: None, analytics: Some(true) };
        run_to_string(Command::Settings { action: SettingsAction::Set(set) }, &container)
            .await
            .unwrap();

        let text = run_to_string(
            Command::Settings { action: SettingsAction::Show { json: true } },
            &container,
        )
        .await
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["theme"], "light");
        assert_eq!(value["notifications"], true);
        assert_eq!(value["analyticsEnabled"], true);
    }

    #[tokio::test]
    async fn empty_settings_set_is_rejected() {
        let container = container().await;
        let set = SetArgs { theme: None, notifications: None, analytics: None };
        let err = run_to_string(Command::Settings { action: SettingsAction::Set(set) }, &container)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Nothing to change"));
    }

    #[tokio::test]
    async fn capabilities_lists_lifetimes() {
        let container = container().await;
        let text = run_to_string(Command::Capabilities, &container).await.unwrap();
        assert!(text.contains("singleton"));
        assert!(text.contains("transient"));
        assert!(text.contains("DashboardRepository"));
        assert!(text.contains("features: dashboard, settings"));
    }

    #[tokio::test]
    async fn unwired_container_fails_cleanly() {
        let err = run_to_string(Command::Dashboard { json: false }, &Container::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not registered"));
    }
}
