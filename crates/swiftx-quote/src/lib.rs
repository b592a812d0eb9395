//! Clients for the swap routing service and the price oracle.
//!
//! [`QuoteInterface`] fetches swift route quotes and token listings.
//! [`PriceFeedInterface`] answers whether a token symbol has an oracle price
//! feed, which decides whether it can be used in conditional orders.

use async_trait::async_trait;
use swiftx_types::{Quote, QuoteRequest, Token};
use thiserror::Error;

pub mod implementations {
	pub mod mayan;
	pub mod pyth;
}

/// Errors returned by the quote and price feed clients.
#[derive(Debug, Error)]
pub enum QuoteError {
	/// The request could not be sent or its body not read.
	#[error("HTTP error: {0}")]
	Http(String),
	/// The upstream answered with a non-success status.
	#[error("Upstream returned status {status}: {body}")]
	Status { status: u16, body: String },
	/// The response body did not match the expected shape.
	#[error("Failed to decode response: {0}")]
	Decode(String),
	/// The routing service returned no swift route.
	#[error("No swift route available")]
	NoQuote,
	/// The backend's configuration table is invalid.
	#[error("Invalid configuration: {0}")]
	Configuration(String),
}

impl From<reqwest::Error> for QuoteError {
	fn from(e: reqwest::Error) -> Self {
		QuoteError::Http(e.to_string())
	}
}

#[async_trait]
pub trait QuoteInterface: Send + Sync {
	/// Returns the first swift quote for the request.
	async fn fetch_quote(&self, request: &QuoteRequest) -> Result<Quote, QuoteError>;

	/// Lists tokens on `chain` with the given standard, either portal-bridged
	/// or native depending on `non_portal`.
	async fn tokens(
		&self,
		chain: &str,
		standard: &str,
		non_portal: bool,
	) -> Result<Vec<Token>, QuoteError>;
}

#[async_trait]
pub trait PriceFeedInterface: Send + Sync {
	/// True when a crypto price feed exists whose base asset is `symbol`.
	async fn has_price_feed(&self, symbol: &str) -> Result<bool, QuoteError>;
}

pub(crate) fn http_client(config: &toml::Value) -> Result<reqwest::Client, QuoteError> {
	let timeout = config
		.get("timeout_secs")
		.and_then(|v| v.as_integer())
		.unwrap_or(10) as u64;

	reqwest::Client::builder()
		.timeout(std::time::Duration::from_secs(timeout))
		.build()
		.map_err(|e| QuoteError::Configuration(e.to_string()))
}

pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(
	response: reqwest::Response,
) -> Result<T, QuoteError> {
	let status = response.status();
	if !status.is_success() {
		let body = response.text().await.unwrap_or_default();
		return Err(QuoteError::Status {
			status: status.as_u16(),
			body,
		});
	}
	let bytes = response.bytes().await?;
	serde_json::from_slice(&bytes).map_err(|e| QuoteError::Decode(e.to_string()))
}
