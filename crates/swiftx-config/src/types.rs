//! Configuration file model.

use alloy_primitives::{address, b256, Address, B256};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use swiftx_types::{IntegratedChain, IntegratedChains};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
	#[serde(default)]
	pub service: ServiceConfig,
	#[serde(default)]
	pub contracts: ContractsConfig,
	#[serde(default)]
	pub order: OrderConfig,
	pub chains: BTreeMap<String, ChainConfig>,
	pub quote: BackendConfig,
	pub price_feed: BackendConfig,
	pub storage: BackendConfig,
}

impl Config {
	pub fn chain(&self, name: &str) -> Option<&ChainConfig> {
		self.chains.get(name)
	}

	pub fn is_integrated(&self, name: &str) -> bool {
		self.chain(name).is_some_and(|c| c.integrated)
	}

	/// Descriptor map served by `/integratedChains`.
	pub fn integrated_chains(&self) -> IntegratedChains {
		self.chains
			.iter()
			.map(|(name, chain)| {
				(
					name.clone(),
					IntegratedChain {
						is_integrated_chain: chain.integrated,
						token_standard: chain.token_standard.clone(),
					},
				)
			})
			.collect()
	}

	/// Provider settings handed to the chain backend factory.
	pub fn chain_backend_config(&self, chain: &ChainConfig) -> toml::Value {
		let mut table = toml::Table::new();
		if let Some(rpc_url) = &chain.rpc_url {
			table.insert("rpc_url".into(), toml::Value::String(rpc_url.clone()));
		}
		table.insert(
			"nonce_finder".into(),
			toml::Value::String(self.contracts.nonce_finder.to_string()),
		);
		toml::Value::Table(table)
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
	#[serde(default = "default_name")]
	pub name: String,
	#[serde(default = "default_host")]
	pub host: String,
	#[serde(default = "default_port")]
	pub port: u16,
	/// Tracing filter used when `--log-level` is not given.
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

impl Default for ServiceConfig {
	fn default() -> Self {
		Self {
			name: default_name(),
			host: default_host(),
			port: default_port(),
			log_level: default_log_level(),
		}
	}
}

fn default_name() -> String {
	"swiftx-relay".to_string()
}

fn default_host() -> String {
	"0.0.0.0".to_string()
}

fn default_port() -> u16 {
	3000
}

fn default_log_level() -> String {
	"info".to_string()
}

/// On-chain contracts the relay targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractsConfig {
	/// SwiftX contract; spender of the permit and transfer recipient.
	pub swift: Address,
	/// Exposes `nextNonce(owner)` for Permit2 unordered nonces.
	pub nonce_finder: Address,
	pub permit2: Address,
}

impl Default for ContractsConfig {
	fn default() -> Self {
		Self {
			swift: address!("5D9C504b3F02611912Af20ED39E60C539621E678"),
			nonce_finder: address!("09E158963a82834a6387bcedEbC0C9d245C4f74c"),
			permit2: address!("000000000022D473030F116dDEE9F6B43aC78BA3"),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderConfig {
	/// Seconds an instant order stays executable after the block timestamp.
	#[serde(default = "default_execution_window")]
	pub execution_window_secs: u64,
	#[serde(default = "default_referrer_bps")]
	pub referrer_bps: u16,
	/// Filler for `OrderParams.random`. Constant across orders.
	#[serde(default = "default_random")]
	pub random: B256,
}

impl Default for OrderConfig {
	fn default() -> Self {
		Self {
			execution_window_secs: default_execution_window(),
			referrer_bps: default_referrer_bps(),
			random: default_random(),
		}
	}
}

fn default_execution_window() -> u64 {
	600
}

fn default_referrer_bps() -> u16 {
	2
}

fn default_random() -> B256 {
	b256!("0000000000000000f2003ec365831e64cc31d9f6f15a2b85399db8d5000960f6")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
	#[serde(default)]
	pub integrated: bool,
	pub token_standard: String,
	/// EVM chain id; the Permit2 domain used by `sign`.
	#[serde(default)]
	pub chain_id: Option<u64>,
	#[serde(default)]
	pub rpc_url: Option<String>,
	/// Referrer address in the chain's native encoding.
	#[serde(default)]
	pub referrer: Option<String>,
}

/// A pluggable component: which backend to use and its own settings table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
	pub backend: String,
	#[serde(default = "empty_table")]
	pub config: toml::Value,
}

fn empty_table() -> toml::Value {
	toml::Value::Table(toml::Table::new())
}
