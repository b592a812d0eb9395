//! Mayan price API client.
//!
//! Quotes come from `GET /v3/quote` and token listings from `GET /v3/tokens`.
//! Numeric quote fields appear either as JSON numbers or as decimal strings
//! (the `*64` variants carry base units); both are accepted.

use crate::{http_client, read_json, QuoteError, QuoteInterface};
use alloy_primitives::B256;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use swiftx_types::{ConfigSchema, Field, FieldType, Quote, QuoteRequest, Schema, Token, ValidationError};
use tracing::{debug, instrument};

const DEFAULT_BASE_URL: &str = "https://price-api.mayan.finance";

#[derive(Debug, Deserialize)]
struct QuoteResponse {
	#[serde(default)]
	quotes: Vec<RawQuote>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuote {
	from_chain: String,
	to_chain: String,
	from_token: RawToken,
	to_token: RawToken,
	#[serde(default)]
	effective_amount_in64: Option<Value>,
	#[serde(default)]
	min_amount_out64: Option<Value>,
	#[serde(default)]
	min_amount_out: Option<Value>,
	#[serde(default)]
	gas_drop64: Option<Value>,
	#[serde(default)]
	gas_drop: Option<Value>,
	#[serde(default)]
	cancel_relayer_fee64: Option<Value>,
	#[serde(default)]
	refund_relayer_fee64: Option<Value>,
	#[serde(default)]
	deadline64: Option<Value>,
	#[serde(default)]
	swift_auction_mode: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawToken {
	contract: String,
	#[serde(default)]
	w_chain_id: Option<Value>,
	#[serde(default)]
	pyth_usd_price_id: Option<String>,
}

/// Reads a non-negative integer from a JSON number or decimal string.
fn integer(field: &str, value: Option<&Value>) -> Result<Option<u64>, QuoteError> {
	let parsed = match value {
		None | Some(Value::Null) => return Ok(None),
		Some(Value::Number(n)) => n.as_u64(),
		Some(Value::String(s)) => s.parse::<u64>().ok(),
		Some(_) => None,
	};
	parsed
		.map(Some)
		.ok_or_else(|| QuoteError::Decode(format!("{} is not a base-unit integer: {:?}", field, value)))
}

fn required(field: &str, value: Option<&Value>) -> Result<u64, QuoteError> {
	integer(field, value)?.ok_or_else(|| QuoteError::Decode(format!("quote is missing {}", field)))
}

impl TryFrom<RawQuote> for Quote {
	type Error = QuoteError;

	fn try_from(raw: RawQuote) -> Result<Self, Self::Error> {
		let dest_chain_id = required("toToken.wChainId", raw.to_token.w_chain_id.as_ref())?;
		let dest_chain_id = u16::try_from(dest_chain_id)
			.map_err(|_| QuoteError::Decode(format!("wChainId {} exceeds uint16", dest_chain_id)))?;

		let auction_mode = integer("swiftAuctionMode", raw.swift_auction_mode.as_ref())?.unwrap_or(0);
		let auction_mode = u8::try_from(auction_mode)
			.map_err(|_| QuoteError::Decode(format!("swiftAuctionMode {} exceeds uint8", auction_mode)))?;

		let price_feed_id = match raw.to_token.pyth_usd_price_id.as_deref() {
			None | Some("") => None,
			Some(id) => Some(
				id.parse::<B256>()
					.map_err(|e| QuoteError::Decode(format!("pythUsdPriceId {:?}: {}", id, e)))?,
			),
		};

		let min_amount_out = match integer("minAmountOut64", raw.min_amount_out64.as_ref())? {
			Some(v) => v,
			None => required("minAmountOut", raw.min_amount_out.as_ref())?,
		};
		let gas_drop = match integer("gasDrop64", raw.gas_drop64.as_ref())? {
			Some(v) => v,
			None => integer("gasDrop", raw.gas_drop.as_ref())?.unwrap_or(0),
		};

		Ok(Quote {
			from_chain: raw.from_chain,
			to_chain: raw.to_chain,
			from_token: raw.from_token.contract,
			to_token: raw.to_token.contract,
			dest_chain_id,
			price_feed_id,
			effective_amount_in: integer("effectiveAmountIn64", raw.effective_amount_in64.as_ref())?
				.unwrap_or(0),
			min_amount_out,
			gas_drop,
			cancel_relayer_fee: required("cancelRelayerFee64", raw.cancel_relayer_fee64.as_ref())?,
			refund_relayer_fee: required("refundRelayerFee64", raw.refund_relayer_fee64.as_ref())?,
			deadline: required("deadline64", raw.deadline64.as_ref())?,
			auction_mode,
		})
	}
}

pub struct MayanQuoteClient {
	client: reqwest::Client,
	base_url: String,
}

impl MayanQuoteClient {
	pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
		Self {
			client,
			base_url: base_url.into().trim_end_matches('/').to_string(),
		}
	}
}

pub struct MayanQuoteSchema;

impl ConfigSchema for MayanQuoteSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		Schema::new(
			vec![],
			vec![
				Field::new("base_url", FieldType::Url),
				Field::new(
					"timeout_secs",
					FieldType::Integer {
						min: Some(1),
						max: Some(300),
					},
				),
			],
		)
		.validate(config)
	}
}

#[async_trait]
impl QuoteInterface for MayanQuoteClient {
	#[instrument(skip(self), fields(from = %request.from_chain, to = %request.to_chain))]
	async fn fetch_quote(&self, request: &QuoteRequest) -> Result<Quote, QuoteError> {
		let amount = request.amount_in.to_string();
		let from_token = request.from_token.to_string();
		let mut query = vec![
			("amountIn64", amount.as_str()),
			("fromToken", from_token.as_str()),
			("fromChain", request.from_chain.as_str()),
			("toToken", request.to_token.as_str()),
			("toChain", request.to_chain.as_str()),
			("slippageBps", "auto"),
			("swift", "true"),
		];
		if let Some(referrer) = &request.referrer {
			query.push(("referrer", referrer.as_str()));
		}

		let response = self
			.client
			.get(format!("{}/v3/quote", self.base_url))
			.query(&query)
			.send()
			.await?;
		let body: QuoteResponse = read_json(response).await?;

		let first = body.quotes.into_iter().next().ok_or(QuoteError::NoQuote)?;
		let quote = Quote::try_from(first)?;
		debug!(min_amount_out = quote.min_amount_out, deadline = quote.deadline, "received quote");
		Ok(quote)
	}

	async fn tokens(
		&self,
		chain: &str,
		standard: &str,
		non_portal: bool,
	) -> Result<Vec<Token>, QuoteError> {
		let non_portal = non_portal.to_string();
		let response = self
			.client
			.get(format!("{}/v3/tokens", self.base_url))
			.query(&[
				("chain", chain),
				("nonPortal", non_portal.as_str()),
				("standard", standard),
			])
			.send()
			.await?;

		let mut listing: HashMap<String, Vec<Token>> = read_json(response).await?;
		Ok(listing.remove(chain).unwrap_or_default())
	}
}

/// Creates a Mayan quote client.
///
/// Configuration parameters:
/// - `base_url` (default: "https://price-api.mayan.finance")
/// - `timeout_secs` (default: 10)
pub fn create_quote(config: &toml::Value) -> Result<Box<dyn crate::QuoteInterface>, QuoteError> {
	MayanQuoteSchema
		.validate(config)
		.map_err(|e| QuoteError::Configuration(e.to_string()))?;

	let base_url = config
		.get("base_url")
		.and_then(|v| v.as_str())
		.unwrap_or(DEFAULT_BASE_URL);

	Ok(Box::new(MayanQuoteClient::new(http_client(config)?, base_url)))
}
