//! SwiftX order and Permit2 transfer payloads.
//!
//! Field order and widths mirror the on-chain `OrderPayload` struct. Wide
//! integers serialize as decimal strings; see [`crate::serde_helpers`].

use crate::serde_helpers::{i64_decimal, u256_decimal, u64_decimal};
use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

/// Destination-side parameters of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderParams {
	pub trader: B256,
	pub token_out: B256,
	#[serde(with = "u64_decimal")]
	pub min_amount_out: u64,
	#[serde(with = "u64_decimal")]
	pub gas_drop: u64,
	#[serde(with = "u64_decimal")]
	pub cancel_fee: u64,
	#[serde(with = "u64_decimal")]
	pub refund_fee: u64,
	#[serde(with = "u64_decimal")]
	pub deadline: u64,
	pub dest_addr: B256,
	pub dest_chain_id: u16,
	pub referrer_addr: B256,
	pub referrer_bps: u8,
	pub auction_mode: u8,
	pub random: B256,
}

/// The order a user signs as the Permit2 witness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
	#[serde(with = "u256_decimal")]
	pub amount_in: U256,
	#[serde(with = "u256_decimal")]
	pub created_at: U256,
	#[serde(with = "u256_decimal")]
	pub nonce: U256,
	pub oracle_feed_id: B256,
	#[serde(with = "i64_decimal")]
	pub min_execution_price: i64,
	#[serde(with = "i64_decimal")]
	pub max_execution_price: i64,
	#[serde(with = "u64_decimal")]
	pub min_execution_time: u64,
	#[serde(with = "u64_decimal")]
	pub max_execution_time: u64,
	#[serde(with = "u64_decimal")]
	pub min_execution_time_interval: u64,
	#[serde(with = "u64_decimal")]
	pub max_execution_time_interval: u64,
	pub token_in: Address,
	pub no_of_orders: u8,
	pub custom_order_type: u8,
	pub order_params: OrderParams,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPermissions {
	pub token: Address,
	#[serde(with = "u256_decimal")]
	pub amount: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermitTransferFrom {
	pub permitted: TokenPermissions,
	#[serde(with = "u256_decimal")]
	pub nonce: U256,
	#[serde(with = "u256_decimal")]
	pub deadline: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureTransferDetails {
	pub to: Address,
	#[serde(with = "u256_decimal")]
	pub requested_amount: U256,
}

/// Arguments for `Permit2.permitWitnessTransferFrom`.
///
/// `signature` stays empty until the owner signs the permit digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferPayload {
	pub permit: PermitTransferFrom,
	pub transfer_details: SignatureTransferDetails,
	pub owner: Address,
	pub witness_type_string: String,
	pub witness: B256,
	#[serde(default)]
	pub signature: Bytes,
}

impl TransferPayload {
	pub fn is_signed(&self) -> bool {
		!self.signature.is_empty()
	}
}

/// An order plus the transfer that funds it. This is the persisted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartiallyBuiltOrder {
	pub order_payload: OrderPayload,
	pub transfer_payload: TransferPayload,
}

impl PartiallyBuiltOrder {
	pub fn witness(&self) -> B256 {
		self.transfer_payload.witness
	}
}

/// Storage key for an order: the witness as 0x-prefixed lowercase hex.
pub fn witness_key(witness: &B256) -> String {
	format!("{:#x}", witness)
}
