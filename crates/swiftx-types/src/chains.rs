//! Integrated chain descriptors.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a chain is exposed through `/integratedChains`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegratedChain {
	pub is_integrated_chain: bool,
	/// Token standard passed to the token listing API, e.g. `erc20`.
	pub token_standard: String,
}

/// Chain name to descriptor, ordered by name for stable output.
pub type IntegratedChains = BTreeMap<String, IntegratedChain>;
