#![allow(non_snake_case)]

use std::sync::Arc;

use anyhow::Result;
use scheduleBot::cli;
use scheduleBot::config::{RunMode, Settings};
use scheduleBot::runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info,warn", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = Settings::load()?;
    let assistant = runtime::build_assistant(&settings)?;

    match settings.run_mode {
        RunMode::Api => runtime::run_api(Arc::new(assistant), &settings).await,
        RunMode::Cli => cli::cli(assistant).await?,
    }
    Ok(())
}
