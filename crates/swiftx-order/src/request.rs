//! Query parameter parsing for order requests.
//!
//! Presence is checked for every parameter, in request order, before any
//! value is parsed; the first absent one is reported.

use crate::OrderError;
use alloy_primitives::{Address, B256, U256};
use std::collections::HashMap;
use swiftx_types::serde_helpers::u256_decimal::parse_u256;
use swiftx_types::{Platform, UniversalAddress};

const BASE_PARAMS: [&str; 7] = [
	"amount",
	"tokenIn",
	"tokenOut",
	"sourceChain",
	"destChain",
	"destAddr",
	"owner",
];

const CONDITIONAL_PARAMS: [&str; 6] = [
	"minExecutionPrice",
	"maxExecutionPrice",
	"minExecutionTime",
	"maxExecutionTime",
	"oracleFeedId",
	"customOrderType",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalParams {
	pub min_execution_price: i64,
	pub max_execution_price: i64,
	pub min_execution_time: u64,
	pub max_execution_time: u64,
	pub oracle_feed_id: B256,
	pub custom_order_type: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderKind {
	/// Executable right away within the configured window.
	Instant,
	/// Executes when the oracle price enters the given band.
	Conditional(ConditionalParams),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
	pub amount: U256,
	pub token_in: Address,
	/// Destination token as the caller wrote it; forwarded to the quote API.
	pub token_out: String,
	pub source_chain: String,
	pub dest_chain: String,
	pub dest_addr: UniversalAddress,
	pub owner: Address,
	pub kind: OrderKind,
}

impl OrderRequest {
	pub fn instant_from_query(params: &HashMap<String, String>) -> Result<Self, OrderError> {
		check_present(params, &BASE_PARAMS)?;
		parse_base(params, OrderKind::Instant)
	}

	pub fn conditional_from_query(params: &HashMap<String, String>) -> Result<Self, OrderError> {
		check_present(params, &BASE_PARAMS)?;
		check_present(params, &CONDITIONAL_PARAMS)?;

		let conditional = ConditionalParams {
			min_execution_price: parse_int(params, "minExecutionPrice")?,
			max_execution_price: parse_int(params, "maxExecutionPrice")?,
			min_execution_time: parse_int(params, "minExecutionTime")?,
			max_execution_time: parse_int(params, "maxExecutionTime")?,
			oracle_feed_id: value(params, "oracleFeedId")
				.parse::<B256>()
				.map_err(|e| OrderError::invalid("oracleFeedId", e))?,
			custom_order_type: parse_int(params, "customOrderType")?,
		};

		if conditional.min_execution_price > conditional.max_execution_price {
			return Err(OrderError::invalid(
				"minExecutionPrice",
				"must not exceed maxExecutionPrice",
			));
		}
		if conditional.min_execution_time > conditional.max_execution_time {
			return Err(OrderError::invalid(
				"minExecutionTime",
				"must not exceed maxExecutionTime",
			));
		}

		parse_base(params, OrderKind::Conditional(conditional))
	}
}

fn check_present(params: &HashMap<String, String>, names: &[&'static str]) -> Result<(), OrderError> {
	for name in names.iter().copied() {
		if !params.get(name).is_some_and(|v| !v.trim().is_empty()) {
			return Err(OrderError::MissingParameter(name));
		}
	}
	Ok(())
}

// Only called after check_present.
fn value<'a>(params: &'a HashMap<String, String>, name: &str) -> &'a str {
	params.get(name).map(|v| v.trim()).unwrap_or_default()
}

fn parse_int<T>(params: &HashMap<String, String>, name: &'static str) -> Result<T, OrderError>
where
	T: std::str::FromStr,
	T::Err: std::fmt::Display,
{
	value(params, name)
		.parse::<T>()
		.map_err(|e| OrderError::invalid(name, e))
}

/// Mixed-case input must carry a valid EIP-55 checksum.
fn parse_address(params: &HashMap<String, String>, name: &'static str) -> Result<Address, OrderError> {
	let raw = value(params, name);
	let digits = raw.strip_prefix("0x").unwrap_or(raw);
	let mixed_case = digits.bytes().any(|b| b.is_ascii_uppercase())
		&& digits.bytes().any(|b| b.is_ascii_lowercase());

	if mixed_case {
		Address::parse_checksummed(raw, None).map_err(|e| OrderError::invalid(name, e))
	} else {
		raw.parse::<Address>().map_err(|e| OrderError::invalid(name, e))
	}
}

fn parse_base(params: &HashMap<String, String>, kind: OrderKind) -> Result<OrderRequest, OrderError> {
	let amount = parse_u256(value(params, "amount")).map_err(|e| OrderError::invalid("amount", e))?;
	if amount.is_zero() {
		return Err(OrderError::invalid("amount", "must be greater than zero"));
	}

	let source_chain = value(params, "sourceChain").to_lowercase();
	let dest_chain = value(params, "destChain").to_lowercase();
	let platform = Platform::for_chain(&dest_chain);

	let token_out = value(params, "tokenOut").to_string();
	UniversalAddress::parse(&token_out, platform).map_err(|e| OrderError::invalid("tokenOut", e))?;

	let dest_addr = UniversalAddress::parse(value(params, "destAddr"), platform)
		.map_err(|e| OrderError::invalid("destAddr", e))?;

	Ok(OrderRequest {
		amount,
		token_in: parse_address(params, "tokenIn")?,
		token_out,
		source_chain,
		dest_chain,
		dest_addr,
		owner: parse_address(params, "owner")?,
		kind,
	})
}
