//! Source-chain reads needed to build an order.
//!
//! An order needs two facts from the chain it is funded on: the owner's next
//! unused Permit2 nonce and the latest block timestamp. Backends implement
//! [`ChainInterface`]; [`ChainService`] routes calls by chain name.

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

pub mod implementations {
	pub mod evm {
		pub mod alloy;
	}
}

/// Errors that can occur while reading chain state.
#[derive(Debug, Error)]
pub enum ChainError {
	/// No client was created for the named chain.
	#[error("Chain '{0}' has no configured client")]
	UnknownChain(String),
	/// The RPC endpoint failed or returned no data.
	#[error("Network error: {0}")]
	Network(String),
	/// The nonce finder call reverted or could not be decoded.
	#[error("Contract call failed: {0}")]
	Call(String),
	/// The backend's configuration table is invalid.
	#[error("Invalid configuration: {0}")]
	Configuration(String),
}

#[async_trait]
pub trait ChainInterface: Send + Sync {
	/// Next unused Permit2 nonce for `owner`, as reported by the nonce finder.
	async fn next_nonce(&self, owner: Address) -> Result<U256, ChainError>;

	/// Timestamp of the latest block header, in seconds.
	async fn latest_block_timestamp(&self) -> Result<u64, ChainError>;
}

pub struct ChainService {
	chains: HashMap<String, Arc<dyn ChainInterface>>,
}

impl ChainService {
	pub fn new(chains: HashMap<String, Box<dyn ChainInterface>>) -> Self {
		Self {
			chains: chains
				.into_iter()
				.map(|(name, chain)| (name, Arc::from(chain)))
				.collect(),
		}
	}

	fn client(&self, chain: &str) -> Result<&Arc<dyn ChainInterface>, ChainError> {
		self.chains
			.get(chain)
			.ok_or_else(|| ChainError::UnknownChain(chain.to_string()))
	}

	pub async fn next_nonce(&self, chain: &str, owner: Address) -> Result<U256, ChainError> {
		self.client(chain)?.next_nonce(owner).await
	}

	pub async fn latest_block_timestamp(&self, chain: &str) -> Result<u64, ChainError> {
		self.client(chain)?.latest_block_timestamp().await
	}
}
