use crate::{EngineError, SwiftEngine};
use std::collections::HashMap;
use std::sync::Arc;
use swiftx_chain::{ChainError, ChainInterface, ChainService};
use swiftx_config::Config;
use swiftx_order::{BuilderSettings, OrderBuilder};
use swiftx_quote::{PriceFeedInterface, QuoteError, QuoteInterface};
use swiftx_storage::{OrderStore, StorageError, StorageInterface, StorageService};
use tracing::info;

// Type aliases for factory functions
type StorageFactory =
	Box<dyn Fn(&toml::Value) -> Result<Box<dyn StorageInterface>, StorageError> + Send>;
type ChainFactory = Box<dyn Fn(&toml::Value) -> Result<Box<dyn ChainInterface>, ChainError> + Send>;
type QuoteFactory = Box<dyn Fn(&toml::Value) -> Result<Box<dyn QuoteInterface>, QuoteError> + Send>;
type PriceFeedFactory =
	Box<dyn Fn(&toml::Value) -> Result<Box<dyn PriceFeedInterface>, QuoteError> + Send>;

/// Wires a [`SwiftEngine`] from config.
///
/// Storage, quote and price feed factories are registered under the backend
/// name the config selects. The chain factory is called once per integrated
/// chain with that chain's provider settings.
pub struct EngineBuilder {
	config: Config,
	storage_factories: HashMap<String, StorageFactory>,
	chain_factory: Option<ChainFactory>,
	quote_factories: HashMap<String, QuoteFactory>,
	price_feed_factories: HashMap<String, PriceFeedFactory>,
}

impl EngineBuilder {
	pub fn new(config: Config) -> Self {
		Self {
			config,
			storage_factories: HashMap::new(),
			chain_factory: None,
			quote_factories: HashMap::new(),
			price_feed_factories: HashMap::new(),
		}
	}

	pub fn with_storage_factory<F>(mut self, name: &str, factory: F) -> Self
	where
		F: Fn(&toml::Value) -> Result<Box<dyn StorageInterface>, StorageError> + Send + 'static,
	{
		self.storage_factories
			.insert(name.to_string(), Box::new(factory));
		self
	}

	pub fn with_chain_factory<F>(mut self, factory: F) -> Self
	where
		F: Fn(&toml::Value) -> Result<Box<dyn ChainInterface>, ChainError> + Send + 'static,
	{
		self.chain_factory = Some(Box::new(factory));
		self
	}

	pub fn with_quote_factory<F>(mut self, name: &str, factory: F) -> Self
	where
		F: Fn(&toml::Value) -> Result<Box<dyn QuoteInterface>, QuoteError> + Send + 'static,
	{
		self.quote_factories
			.insert(name.to_string(), Box::new(factory));
		self
	}

	pub fn with_price_feed_factory<F>(mut self, name: &str, factory: F) -> Self
	where
		F: Fn(&toml::Value) -> Result<Box<dyn PriceFeedInterface>, QuoteError> + Send + 'static,
	{
		self.price_feed_factories
			.insert(name.to_string(), Box::new(factory));
		self
	}

	pub fn build(self) -> Result<SwiftEngine, EngineError> {
		let config = self.config;

		// Create storage backend
		let storage_factory = self
			.storage_factories
			.get(&config.storage.backend)
			.ok_or_else(|| missing("storage", &config.storage.backend))?;
		let storage_backend = storage_factory(&config.storage.config)
			.map_err(|e| EngineError::Config(e.to_string()))?;
		let orders = OrderStore::new(Arc::new(StorageService::new(storage_backend)));

		// Create one chain client per integrated chain
		let chain_factory = self
			.chain_factory
			.ok_or_else(|| EngineError::Config("Chain factory not provided".into()))?;
		let mut chains = HashMap::new();
		for (name, chain) in config.chains.iter().filter(|(_, c)| c.integrated) {
			let client = chain_factory(&config.chain_backend_config(chain)).map_err(|e| {
				EngineError::Config(format!("Chain '{}': {}", name, e))
			})?;
			chains.insert(name.clone(), client);
		}
		info!(chains = chains.len(), "chain clients ready");

		let quote_factory = self
			.quote_factories
			.get(&config.quote.backend)
			.ok_or_else(|| missing("quote", &config.quote.backend))?;
		let quote: Arc<dyn QuoteInterface> = Arc::from(
			quote_factory(&config.quote.config).map_err(|e| EngineError::Config(e.to_string()))?,
		);

		let price_feed_factory = self
			.price_feed_factories
			.get(&config.price_feed.backend)
			.ok_or_else(|| missing("price feed", &config.price_feed.backend))?;
		let price_feed: Arc<dyn PriceFeedInterface> = Arc::from(
			price_feed_factory(&config.price_feed.config)
				.map_err(|e| EngineError::Config(e.to_string()))?,
		);

		let referrer_bps = u8::try_from(config.order.referrer_bps).map_err(|_| {
			EngineError::Config(format!(
				"referrer_bps {} does not fit uint8",
				config.order.referrer_bps
			))
		})?;
		let builder = OrderBuilder::new(BuilderSettings {
			execution_window_secs: config.order.execution_window_secs,
			referrer_bps,
			random: config.order.random,
			swift: config.contracts.swift,
		});

		Ok(SwiftEngine {
			config,
			chains: ChainService::new(chains),
			quote,
			price_feed,
			orders,
			builder,
		})
	}
}

fn missing(component: &str, backend: &str) -> EngineError {
	EngineError::Config(format!(
		"No {} factory registered for backend '{}'",
		component, backend
	))
}
