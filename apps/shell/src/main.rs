mod cli;
mod commands;
mod render;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use thriftwood::domain::config::{AppConfig, RuntimeProfile};
use thriftwood::kernel::config::load_config;
use thw_logger::Logger;
use thw_runtime::RuntimeConfig;

// The runtime is built after the config is read, since the config names its profile.
// `block_on` keeps the view-models on this thread under either profile.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config: AppConfig =
        load_config(cli.config.as_deref()).context("Critical: Configuration is malformed")?;
    cli.apply(&mut config);

    let _logger = init_logging(&config)?;

    let runtime = thw_runtime::build_runtime(&runtime_config(config.runtime.profile))?;
    tracing::debug!(profile = %config.runtime.profile, "Runtime started");

    runtime.block_on(async move {
        let container =
            thriftwood::bootstrap(&config).await.context("Failed to wire application services")?;

        let mut stdout = std::io::stdout().lock();
        commands::run(cli.command, &container, &mut stdout).await
    })
}

fn runtime_config(profile: RuntimeProfile) -> RuntimeConfig {
    match profile {
        RuntimeProfile::Interactive => RuntimeConfig::interactive(),
        RuntimeProfile::Background => RuntimeConfig::background(),
    }
}

fn init_logging(config: &AppConfig) -> anyhow::Result<Logger> {
    let mut builder = Logger::builder().name(env!("CARGO_BIN_NAME")).level_name(&config.logging.level);
    if let Some(directory) = &config.logging.directory {
        builder = builder.directory(directory).json(config.logging.json);
    }
    builder.init().context("Failed to initialize logging")
}
