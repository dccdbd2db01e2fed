mod board;
mod config;
mod direction;
mod error;
mod game;
mod input;
mod maze;
mod runtime;
mod snake;
mod term;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::Config::parse();

    // The matrix owns stdout, so logs only go to stderr and stay quiet unless asked for.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "matrix_snake=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .init();

    info!(?config, "starting");

    // Runs until the player quits
    runtime::run(config).await
}
