use alloy::signers::local::PrivateKeySigner;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use swiftx_config::{Config, ConfigLoader};
use swiftx_order::{sign_transfer, SigningContext};
use swiftx_service::{factories, server};
use swiftx_types::PartiallyBuiltOrder;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "swiftx-relay")]
#[command(about = "SwiftX order relay", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	#[arg(short, long, value_name = "FILE", default_value = "config/local.toml")]
	config: PathBuf,

	/// Overrides `[service].log_level` and SWIFTX_LOG_LEVEL
	#[arg(long)]
	log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
	/// Start the relay HTTP service
	Start,
	/// Validate the configuration file
	Validate,
	/// Sign the transfer payload of a built order with a local key
	Sign {
		/// Order JSON as returned by /instantOrder or /conditionalOrder
		#[arg(long, value_name = "FILE")]
		order: PathBuf,

		/// Source chain of the order; its configured chain_id selects the permit domain
		#[arg(long)]
		chain: String,

		/// Where to write the signed order (defaults to overwriting --order)
		#[arg(long, value_name = "FILE")]
		output: Option<PathBuf>,

		#[arg(long, env = "SWIFTX_SIGNER_KEY", hide_env_values = true)]
		signer_key: String,
	},
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	let loaded = ConfigLoader::new().with_file(&cli.config).load().await;
	let log_level = cli
		.log_level
		.clone()
		.or_else(|| loaded.as_ref().ok().map(|c| c.service.log_level.clone()))
		.unwrap_or_else(|| "info".to_string());
	setup_tracing(&log_level)?;

	let config = loaded.context("Failed to load configuration")?;
	info!("Loaded configuration from: {:?}", cli.config);

	match cli.command {
		Some(Commands::Start) | None => start_service(config).await,
		Some(Commands::Validate) => validate_config(&config),
		Some(Commands::Sign {
			ref order,
			ref chain,
			ref output,
			ref signer_key,
		}) => sign_order(&config, order, chain, output.as_deref(), signer_key).await,
	}
}

async fn start_service(config: Config) -> Result<()> {
	info!("Starting {}", config.service.name);

	let service_config = config.service.clone();
	let engine = factories::engine_builder(config)
		.build()
		.context("Failed to build relay engine")?;

	server::start_server(&service_config, Arc::new(engine), shutdown_signal())
		.await
		.context("HTTP server failed")?;

	info!("{} stopped", service_config.name);
	Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
	info!("Configuration is valid");
	info!(
		"Service: {} on {}:{} (log level {})",
		config.service.name, config.service.host, config.service.port, config.service.log_level
	);
	for (name, chain) in &config.chains {
		info!(
			"  Chain {}: integrated={} standard={} chain_id={:?}",
			name, chain.integrated, chain.token_standard, chain.chain_id
		);
	}
	info!("  Quote backend: {}", config.quote.backend);
	info!("  Price feed backend: {}", config.price_feed.backend);
	info!("  Storage backend: {}", config.storage.backend);

	Ok(())
}

async fn sign_order(
	config: &Config,
	order_path: &Path,
	chain: &str,
	output: Option<&Path>,
	signer_key: &str,
) -> Result<()> {
	let chain_id = match config.chain(&chain.to_lowercase()).and_then(|c| c.chain_id) {
		Some(id) => id,
		None => bail!("Chain '{}' has no chain_id configured", chain),
	};
	let signer: PrivateKeySigner = signer_key
		.trim()
		.parse()
		.context("SWIFTX_SIGNER_KEY is not a valid private key")?;

	let raw = tokio::fs::read_to_string(order_path)
		.await
		.with_context(|| format!("Failed to read {:?}", order_path))?;
	let mut order: PartiallyBuiltOrder =
		serde_json::from_str(&raw).context("Order file is not a valid order")?;

	if order.witness() != swiftx_order::compute_witness(&order.order_payload) {
		bail!("Order witness does not match its payload");
	}
	if order.transfer_payload.is_signed() {
		warn!("Replacing existing signature");
	}

	let ctx = SigningContext {
		chain_id,
		permit2: config.contracts.permit2,
		spender: config.contracts.swift,
	};
	sign_transfer(&mut order.transfer_payload, &signer, &ctx)
		.await
		.context("Failed to sign transfer payload")?;

	let target = output.unwrap_or(order_path);
	let json = serde_json::to_string_pretty(&order)?;
	tokio::fs::write(target, json)
		.await
		.with_context(|| format!("Failed to write {:?}", target))?;

	info!(witness = %order.witness(), signer = %signer.address(), "Signed order written to {:?}", target);
	Ok(())
}

fn setup_tracing(log_level: &str) -> Result<()> {
	let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

	tracing_subscriber::registry()
		.with(env_filter)
		.with(tracing_subscriber::fmt::layer())
		.try_init()
		.context("Failed to initialise tracing")?;

	Ok(())
}

async fn shutdown_signal() {
	let ctrl_c = async {
		if let Err(e) = signal::ctrl_c().await {
			warn!("Failed to listen for Ctrl+C: {}", e);
			std::future::pending::<()>().await;
		}
	};

	#[cfg(unix)]
	let terminate = async {
		match signal::unix::signal(signal::unix::SignalKind::terminate()) {
			Ok(mut stream) => {
				stream.recv().await;
			}
			Err(e) => {
				warn!("Failed to install SIGTERM handler: {}", e);
				std::future::pending::<()>().await;
			}
		}
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => {},
		_ = terminate => {},
	}

	info!("Shutdown signal received");
}
