use crate::EngineError;
use alloy_primitives::B256;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use swiftx_chain::ChainService;
use swiftx_config::Config;
use swiftx_order::{OrderBuilder, OrderInputs, OrderRequest};
use swiftx_quote::{PriceFeedInterface, QuoteInterface};
use swiftx_storage::OrderStore;
use swiftx_types::{IntegratedChains, PartiallyBuiltOrder, QuoteRequest, Token};
use tracing::{debug, info, instrument, warn};

pub struct SwiftEngine {
	pub(crate) config: Config,
	pub(crate) chains: ChainService,
	pub(crate) quote: Arc<dyn QuoteInterface>,
	pub(crate) price_feed: Arc<dyn PriceFeedInterface>,
	pub(crate) orders: OrderStore,
	pub(crate) builder: OrderBuilder,
}

impl SwiftEngine {
	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Builds an instant order from raw query parameters.
	#[instrument(skip_all)]
	pub async fn create_instant_order(
		&self,
		params: &HashMap<String, String>,
	) -> Result<PartiallyBuiltOrder, EngineError> {
		let request = OrderRequest::instant_from_query(params)?;
		self.create_order(request).await
	}

	/// Builds a conditional (limit) order from raw query parameters.
	#[instrument(skip_all)]
	pub async fn create_conditional_order(
		&self,
		params: &HashMap<String, String>,
	) -> Result<PartiallyBuiltOrder, EngineError> {
		let request = OrderRequest::conditional_from_query(params)?;
		self.create_order(request).await
	}

	#[instrument(skip_all, fields(source = %request.source_chain, dest = %request.dest_chain, owner = %request.owner))]
	async fn create_order(&self, request: OrderRequest) -> Result<PartiallyBuiltOrder, EngineError> {
		if !self.config.is_integrated(&request.source_chain) {
			return Err(EngineError::ChainNotIntegrated);
		}

		let nonce = self
			.chains
			.next_nonce(&request.source_chain, request.owner)
			.await
			.map_err(|e| EngineError::upstream("nonce lookup", e))?;
		debug!(%nonce, "fetched permit nonce");

		let referrer = self
			.config
			.chain(&request.dest_chain)
			.and_then(|c| c.referrer.clone());

		let quote = self
			.quote
			.fetch_quote(&QuoteRequest {
				amount_in: request.amount,
				from_token: request.token_in,
				to_token: request.token_out.clone(),
				from_chain: request.source_chain.clone(),
				to_chain: request.dest_chain.clone(),
				referrer: referrer.clone(),
			})
			.await
			.map_err(|e| EngineError::upstream("quote", e))?;

		let block_timestamp = self
			.chains
			.latest_block_timestamp(&request.source_chain)
			.await
			.map_err(|e| EngineError::upstream("block timestamp", e))?;

		let order = self
			.builder
			.build(&OrderInputs {
				request: &request,
				quote: &quote,
				nonce,
				block_timestamp,
				referrer: referrer.as_deref(),
			})
			.map_err(|e| EngineError::upstream("order build", e))?;

		info!(witness = %order.transfer_payload.witness, "built order");
		Ok(order)
	}

	/// Stores a client-built order under its witness, which must be the hash
	/// of its payload.
	#[instrument(skip_all, fields(witness = %order.transfer_payload.witness))]
	pub async fn publish_order(&self, order: &PartiallyBuiltOrder) -> Result<(), EngineError> {
		let witness = order.witness();
		if witness != swiftx_order::compute_witness(&order.order_payload) {
			return Err(EngineError::Validation(
				"Witness does not match order payload".to_string(),
			));
		}
		if !order.transfer_payload.is_signed() {
			warn!("publishing order without a signature");
		}

		self.orders.add_order(order, &witness).await?;
		info!("published order");
		Ok(())
	}

	#[instrument(skip(self))]
	pub async fn remove_order(&self, witness: &B256) -> Result<(), EngineError> {
		self.orders.delete_order(witness).await?;
		info!("removed order");
		Ok(())
	}

	pub async fn get_order(&self, witness: &B256) -> Result<PartiallyBuiltOrder, EngineError> {
		self.orders
			.get_order(witness)
			.await?
			.ok_or(EngineError::NotFound)
	}

	pub async fn get_orders(&self) -> Result<Vec<PartiallyBuiltOrder>, EngineError> {
		Ok(self.orders.get_orders().await?)
	}

	pub fn integrated_chains(&self) -> IntegratedChains {
		self.config.integrated_chains()
	}

	/// `{chain: true}` for an integrated chain.
	pub fn is_integrated_chain(&self, chain: &str) -> Result<BTreeMap<String, bool>, EngineError> {
		let chain = chain.to_lowercase();
		if !self.config.is_integrated(&chain) {
			return Err(EngineError::ChainNotFound);
		}
		Ok(BTreeMap::from([(chain, true)]))
	}

	/// Portal and non-portal tokens listed for an integrated chain.
	#[instrument(skip(self))]
	pub async fn gasless_tokens(&self, chain: &str) -> Result<Vec<Token>, EngineError> {
		let chain = chain.to_lowercase();
		let standard = match self.config.chain(&chain) {
			Some(c) if c.integrated => c.token_standard.clone(),
			_ => return Err(EngineError::ChainNotFound),
		};

		let mut tokens = Vec::new();
		for non_portal in [true, false] {
			let listed = self
				.quote
				.tokens(&chain, &standard, non_portal)
				.await
				.map_err(|e| {
					warn!(error = %e, non_portal, "token listing failed");
					EngineError::TokenListing(e.to_string())
				})?;
			tokens.extend(listed);
		}
		Ok(tokens)
	}

	/// Lowercased symbols of gasless tokens that have a price feed.
	#[instrument(skip(self))]
	pub async fn gasless_limit_tokens(&self, chain: &str) -> Result<Vec<String>, EngineError> {
		let tokens = self.gasless_tokens(chain).await?;

		let mut seen = HashSet::new();
		let mut symbols = Vec::new();
		for token in tokens {
			let symbol = token.symbol.to_lowercase();
			if !seen.insert(symbol.clone()) {
				continue;
			}
			let has_feed = self
				.price_feed
				.has_price_feed(&symbol)
				.await
				.map_err(|e| EngineError::TokenListing(e.to_string()))?;
			if has_feed {
				symbols.push(symbol);
			}
		}
		debug!(count = symbols.len(), "matched price feeds");
		Ok(symbols)
	}
}
