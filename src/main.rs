//! Foreman CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use foreman::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    // Credentials and model overrides may come from a .env file.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match foreman::ConfigLoader::load() {
        Ok(config) => config,
        Err(err) => {
            foreman::cli::handle_error(err, cli.json);
            return;
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let result = match cli.command {
        Commands::Init(args) => foreman::cli::commands::init::execute(args, config, cli.json).await,
        Commands::Run(args) => foreman::cli::commands::run::execute(args, config, cli.json).await,
        Commands::Agents(args) => foreman::cli::commands::agents::execute(args, cli.json).await,
        Commands::Doctor(args) => {
            foreman::cli::commands::doctor::execute(args, config, cli.json).await
        }
        Commands::Hook(command) => foreman::cli::commands::hook::execute(command, cli.json).await,
    };

    if let Err(err) = result {
        foreman::cli::handle_error(err, cli.json);
    }
}
