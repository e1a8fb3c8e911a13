//src/main.rs

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crm_client::{
    config::{AppState, ClientConfig},
    handlers::{self, Cli},
    ui::TerminalInteraction,
};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Logs vão para o stderr; o stdout fica livre para o CSV.
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    // Sem configuração válida o cliente não deve iniciar.
    let config = ClientConfig::from_env()?;
    tracing::debug!("🔧 API em {}", config.api_url);
    let app_state = AppState::new(config)?;

    let ui = TerminalInteraction::new(cli.yes);
    match handlers::run(cli.command, &app_state, &ui).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            tracing::error!("{}", e.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}
