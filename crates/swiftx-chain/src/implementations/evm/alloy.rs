//! Alloy-based EVM chain reader.

use crate::{ChainError, ChainInterface};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::eips::BlockNumberOrTag;
use alloy::sol;
use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use swiftx_types::{ConfigSchema, Field, FieldType, Schema, ValidationError};
use tracing::debug;

sol! {
	#[sol(rpc)]
	interface INonceFinder {
		function nextNonce(address owner) external view returns (uint256);
	}
}

pub struct AlloyChain {
	provider: DynProvider,
	nonce_finder: Address,
}

impl AlloyChain {
	pub fn new(rpc_url: &str, nonce_finder: Address) -> Result<Self, ChainError> {
		let url: reqwest::Url = rpc_url
			.parse()
			.map_err(|e| ChainError::Configuration(format!("Invalid RPC URL: {}", e)))?;

		let provider = ProviderBuilder::new().connect_http(url).erased();

		Ok(Self {
			provider,
			nonce_finder,
		})
	}
}

pub struct AlloyChainSchema;

impl ConfigSchema for AlloyChainSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			vec![
				Field::new("rpc_url", FieldType::Url),
				Field::new("nonce_finder", FieldType::Address),
			],
			vec![],
		);

		schema.validate(config)
	}
}

#[async_trait]
impl ChainInterface for AlloyChain {
	async fn next_nonce(&self, owner: Address) -> Result<U256, ChainError> {
		let finder = INonceFinder::new(self.nonce_finder, self.provider.clone());
		let nonce = finder
			.nextNonce(owner)
			.call()
			.await
			.map_err(|e| ChainError::Call(format!("nextNonce({}) failed: {}", owner, e)))?;

		debug!(%owner, %nonce, "fetched permit nonce");
		Ok(nonce)
	}

	async fn latest_block_timestamp(&self) -> Result<u64, ChainError> {
		let block = self
			.provider
			.get_block_by_number(BlockNumberOrTag::Latest)
			.await
			.map_err(|e| ChainError::Network(format!("Failed to get latest block: {}", e)))?
			.ok_or_else(|| ChainError::Network("Latest block not returned".to_string()))?;

		Ok(block.header.timestamp)
	}
}

/// Creates an EVM chain reader.
///
/// Configuration parameters:
/// - `rpc_url`: HTTP JSON-RPC endpoint
/// - `nonce_finder`: address of the nonce finder contract
pub fn create_chain(config: &toml::Value) -> Result<Box<dyn ChainInterface>, ChainError> {
	AlloyChainSchema
		.validate(config)
		.map_err(|e| ChainError::Configuration(e.to_string()))?;

	let rpc_url = config
		.get("rpc_url")
		.and_then(|v| v.as_str())
		.ok_or_else(|| ChainError::Configuration("rpc_url is required".to_string()))?;

	let nonce_finder = config
		.get("nonce_finder")
		.and_then(|v| v.as_str())
		.ok_or_else(|| ChainError::Configuration("nonce_finder is required".to_string()))?
		.parse::<Address>()
		.map_err(|e| ChainError::Configuration(format!("Invalid nonce_finder: {}", e)))?;

	Ok(Box::new(AlloyChain::new(rpc_url, nonce_finder)?))
}
