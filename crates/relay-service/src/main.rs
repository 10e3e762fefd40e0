use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use relay_config::{ConfigLoader, RelayConfig};
use relay_service::{api, state::AppState};
use std::path::PathBuf;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "modran-relay")]
#[command(about = "Meta-transaction relay service", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Configuration file; defaults plus environment variables apply when
	/// omitted.
	#[arg(short, long, value_name = "FILE")]
	config: Option<PathBuf>,

	#[arg(long, env = "RELAY_LOG_LEVEL", default_value = "info")]
	log_level: String,
}

#[derive(Subcommand)]
enum Commands {
	/// Start the relay service
	Start,
	/// Validate the configuration and exit
	Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	setup_tracing(&cli.log_level);

	match cli.command {
		Some(Commands::Start) | None => start_service(cli).await,
		Some(Commands::Validate) => validate_config(cli).await,
	}
}

async fn start_service(cli: Cli) -> Result<()> {
	info!("Starting relay service");

	let config = load_config(&cli).context("Failed to load configuration")?;
	info!("Service name: {}", config.service.name);
	info!("RPC endpoint: {}", config.network.rpc_url);

	let state = AppState::from_config(&config)
		.await
		.context("Failed to initialize service state")?;

	let host = config.service.host.clone();
	let port = config.service.port;

	tokio::select! {
		result = api::serve(state, &host, port) => result.context("HTTP server failed"),
		_ = shutdown_signal() => {
			info!("Shutdown signal received, stopping service");
			Ok(())
		}
	}
}

async fn validate_config(cli: Cli) -> Result<()> {
	let config = load_config(&cli).context("Configuration is invalid")?;

	info!("Configuration is valid");
	info!(
		"Service: {} on {}:{}",
		config.service.name, config.service.host, config.service.port
	);
	if config.relayer.private_key.is_none() {
		info!("No relayer key configured - relay endpoints will be disabled");
	}
	if config.oracle.address.is_none() {
		info!("No score oracle configured - scores stay local");
	}

	Ok(())
}

fn load_config(cli: &Cli) -> Result<RelayConfig, relay_config::ConfigError> {
	ConfigLoader::from_env_and_file(cli.config.as_deref())
}

fn setup_tracing(level: &str) {
	let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
	let _ = signal::ctrl_c().await;
}
