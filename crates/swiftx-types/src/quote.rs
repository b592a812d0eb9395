//! Quote and token listing types consumed from the swap routing service.

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

/// Parameters of a quote request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
	pub amount_in: U256,
	pub from_token: Address,
	pub to_token: String,
	pub from_chain: String,
	pub to_chain: String,
	/// Referrer for the destination chain, in that chain's native encoding.
	pub referrer: Option<String>,
}

/// The subset of a swift route quote that an order is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
	pub from_chain: String,
	pub to_chain: String,
	pub from_token: String,
	pub to_token: String,
	/// Wormhole chain id of the destination token.
	pub dest_chain_id: u16,
	pub price_feed_id: Option<B256>,
	pub effective_amount_in: u64,
	pub min_amount_out: u64,
	pub gas_drop: u64,
	pub cancel_relayer_fee: u64,
	pub refund_relayer_fee: u64,
	pub deadline: u64,
	pub auction_mode: u8,
}

/// A token entry from the listing API.
///
/// Only `symbol` and `contract` are interpreted; everything else is passed
/// through to API clients untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
	pub symbol: String,
	pub contract: String,
	#[serde(flatten)]
	pub extra: serde_json::Map<String, serde_json::Value>,
}
