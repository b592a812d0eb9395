//! Pyth Hermes price feed lookup.

use crate::{http_client, read_json, PriceFeedInterface, QuoteError};
use async_trait::async_trait;
use serde::Deserialize;
use swiftx_types::{ConfigSchema, Field, FieldType, Schema, ValidationError};
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://hermes.pyth.network";

#[derive(Debug, Deserialize)]
struct PriceFeed {
	#[serde(default)]
	attributes: FeedAttributes,
}

#[derive(Debug, Default, Deserialize)]
struct FeedAttributes {
	#[serde(default)]
	base: Option<String>,
}

pub struct PythHermesClient {
	client: reqwest::Client,
	base_url: String,
}

impl PythHermesClient {
	pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
		Self {
			client,
			base_url: base_url.into().trim_end_matches('/').to_string(),
		}
	}
}

pub struct PythHermesSchema;

impl ConfigSchema for PythHermesSchema {
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
impl PriceFeedInterface for PythHermesClient {
	async fn has_price_feed(&self, symbol: &str) -> Result<bool, QuoteError> {
		let symbol = symbol.to_lowercase();
		let response = self
			.client
			.get(format!("{}/v2/price_feeds", self.base_url))
			.header(reqwest::header::ACCEPT, "application/json")
			.query(&[("query", symbol.as_str()), ("asset_type", "crypto")])
			.send()
			.await?;
		let feeds: Vec<PriceFeed> = read_json(response).await?;

		let found = feeds.iter().any(|feed| {
			feed.attributes
				.base
				.as_deref()
				.is_some_and(|base| base.eq_ignore_ascii_case(&symbol))
		});
		debug!(%symbol, candidates = feeds.len(), found, "price feed lookup");
		Ok(found)
	}
}

/// Creates a Hermes client.
///
/// Configuration parameters:
/// - `base_url` (default: "https://hermes.pyth.network")
/// - `timeout_secs` (default: 10)
pub fn create_price_feed(
	config: &toml::Value,
) -> Result<Box<dyn PriceFeedInterface>, QuoteError> {
	PythHermesSchema
		.validate(config)
		.map_err(|e| QuoteError::Configuration(e.to_string()))?;

	let base_url = config
		.get("base_url")
		.and_then(|v| v.as_str())
		.unwrap_or(DEFAULT_BASE_URL);

	Ok(Box::new(PythHermesClient::new(http_client(config)?, base_url)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;
	use wiremock::matchers::{method, path, query_param};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	#[tokio::test]
	async fn test_matches_base_symbol_case_insensitively() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/v2/price_feeds"))
			.and(query_param("query", "weth"))
			.and(query_param("asset_type", "crypto"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!([
				{"id": "aa", "attributes": {"base": "WETH2", "quote_currency": "USD"}},
				{"id": "bb", "attributes": {"base": "WETH", "quote_currency": "USD"}}
			])))
			.mount(&server)
			.await;
		Mock::given(method("GET"))
			.and(path("/v2/price_feeds"))
			.and(query_param("query", "degen"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!([
				{"id": "cc", "attributes": {"base": "DEGENX"}},
				{"id": "dd", "attributes": {}}
			])))
			.mount(&server)
			.await;

		let client = PythHermesClient::new(reqwest::Client::new(), server.uri());
		assert!(client.has_price_feed("WETH").await.unwrap());
		assert!(!client.has_price_feed("DEGEN").await.unwrap());
	}

	#[tokio::test]
	async fn test_upstream_failure_is_error() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/v2/price_feeds"))
			.respond_with(ResponseTemplate::new(503))
			.mount(&server)
			.await;

		let client = PythHermesClient::new(reqwest::Client::new(), server.uri());
		assert!(matches!(
			client.has_price_feed("usdc").await,
			Err(QuoteError::Status { status: 503, .. })
		));
	}
}
