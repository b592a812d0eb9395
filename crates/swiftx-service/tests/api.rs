use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use axum::{
	body::{to_bytes, Body},
	http::{Request, StatusCode},
	Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use swiftx_chain::{ChainError, ChainInterface};
use swiftx_config::ConfigLoader;
use swiftx_core::EngineBuilder;
use swiftx_quote::{PriceFeedInterface, QuoteError, QuoteInterface};
use swiftx_service::server::router;
use swiftx_storage::implementations::memory;
use swiftx_types::{Quote, QuoteRequest, Token};
use tower::ServiceExt;

const BLOCK_TIMESTAMP: u64 = 1_743_838_000;

const CONFIG: &str = r#"
[chains.base]
integrated = true
token_standard = "erc20"
chain_id = 8453
rpc_url = "http://localhost:8545"

[chains.solana]
token_standard = "spl"
referrer = "8fFsLKGv5sizL97mjtrVvPu9trQAHZx5HBeLGzLVAt2o"

[quote]
backend = "mock"

[price_feed]
backend = "mock"

[storage]
backend = "memory"
"#;

const INSTANT_QUERY: &str = "amount=2000000\
	&tokenIn=0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913\
	&tokenOut=7vfCXTUXx5WJV5JADk17DUJ4ksgau7utNKj4b963voxs\
	&sourceChain=base\
	&destChain=solana\
	&destAddr=8fFsLKGv5sizL97mjtrVvPu9trQAHZx5HBeLGzLVAt2o\
	&owner=0x1F5781Fce9Ee70eC54047A219c9F128972582eB3";

struct MockChain;

#[async_trait]
impl ChainInterface for MockChain {
	async fn next_nonce(&self, _owner: Address) -> Result<U256, ChainError> {
		Ok(U256::from(4u64))
	}

	async fn latest_block_timestamp(&self) -> Result<u64, ChainError> {
		Ok(BLOCK_TIMESTAMP)
	}
}

struct MockQuote {
	fail: bool,
}

#[async_trait]
impl QuoteInterface for MockQuote {
	async fn fetch_quote(&self, request: &QuoteRequest) -> Result<Quote, QuoteError> {
		if self.fail {
			return Err(QuoteError::NoQuote);
		}
		Ok(Quote {
			from_chain: request.from_chain.clone(),
			to_chain: request.to_chain.clone(),
			from_token: request.from_token.to_string(),
			to_token: request.to_token.clone(),
			dest_chain_id: 1,
			price_feed_id: None,
			effective_amount_in: 2_000_000,
			min_amount_out: 13_100_000,
			gas_drop: 0,
			cancel_relayer_fee: 21_000,
			refund_relayer_fee: 1_400,
			deadline: BLOCK_TIMESTAMP + 3_600,
			auction_mode: 2,
		})
	}

	async fn tokens(
		&self,
		_chain: &str,
		_standard: &str,
		non_portal: bool,
	) -> Result<Vec<Token>, QuoteError> {
		if self.fail {
			return Err(QuoteError::Status {
				status: 503,
				body: "unavailable".into(),
			});
		}
		let symbol = if non_portal { "USDC" } else { "WBTC" };
		Ok(vec![Token {
			symbol: symbol.to_string(),
			contract: "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913".to_string(),
			extra: serde_json::Map::new(),
		}])
	}
}

struct MockFeed;

#[async_trait]
impl PriceFeedInterface for MockFeed {
	async fn has_price_feed(&self, symbol: &str) -> Result<bool, QuoteError> {
		Ok(symbol == "usdc")
	}
}

fn app_with(fail_upstream: bool) -> Router {
	let config = ConfigLoader::new()
		.with_env_prefix("SWIFTX_API_TEST_")
		.parse(CONFIG)
		.unwrap();

	let engine = EngineBuilder::new(config)
		.with_storage_factory("memory", memory::create_storage)
		.with_chain_factory(|_| Ok(Box::new(MockChain)))
		.with_quote_factory("mock", move |_| {
			Ok(Box::new(MockQuote {
				fail: fail_upstream,
			}))
		})
		.with_price_feed_factory("mock", |_| Ok(Box::new(MockFeed)))
		.build()
		.unwrap();

	router(Arc::new(engine))
}

fn app() -> Router {
	app_with(false)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
	let response = app.clone().oneshot(request).await.unwrap();
	let status = response.status();
	let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
	let body = if bytes.is_empty() {
		Value::Null
	} else {
		serde_json::from_slice(&bytes).unwrap()
	};
	(status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
	send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
	let request = Request::post(uri)
		.header("content-type", "application/json")
		.body(Body::from(body.to_string()))
		.unwrap();
	send(app, request).await
}

#[tokio::test]
async fn test_instant_order_end_to_end() {
	let app = app();
	let (status, body) = get(&app, &format!("/instantOrder?{}", INSTANT_QUERY)).await;

	assert_eq!(status, StatusCode::OK);
	let payload = &body["orderPayload"];
	assert_eq!(payload["amountIn"], "2000000");
	assert_eq!(payload["customOrderType"], 1);
	assert_eq!(payload["minExecutionTime"], BLOCK_TIMESTAMP.to_string());
	assert_eq!(payload["maxExecutionTime"], (BLOCK_TIMESTAMP + 600).to_string());
	assert_eq!(payload["nonce"], "4");

	let transfer = &body["transferPayload"];
	assert_eq!(
		transfer["owner"].as_str().unwrap().to_lowercase(),
		"0x1f5781fce9ee70ec54047a219c9f128972582eb3"
	);
	assert!(transfer["witnessTypeString"]
		.as_str()
		.unwrap()
		.starts_with("OrderPayload witness)"));
	assert_eq!(transfer["signature"], "0x");
}

#[tokio::test]
async fn test_missing_owner_is_bad_request() {
	let query = INSTANT_QUERY
		.split('&')
		.filter(|p| !p.starts_with("owner="))
		.collect::<Vec<_>>()
		.join("&");

	let (status, body) = get(&app(), &format!("/instantOrder?{}", query)).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body, json!({"error": "Missing required parameter: owner"}));
}

#[tokio::test]
async fn test_unintegrated_source_chain() {
	let query = INSTANT_QUERY.replace("sourceChain=base", "sourceChain=Ethereum");
	let (status, body) = get(&app(), &format!("/instantOrder?{}", query)).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body, json!({"error": "Source chain is not integrated"}));
}

#[tokio::test]
async fn test_upstream_failure_hides_details() {
	let (status, body) = get(&app_with(true), &format!("/instantOrder?{}", INSTANT_QUERY)).await;
	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(body, json!({"error": "internal server error"}));
}

#[tokio::test]
async fn test_conditional_order_requires_constraints() {
	let (status, body) = get(&app(), &format!("/conditionalOrder?{}", INSTANT_QUERY)).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(
		body,
		json!({"error": "Missing required parameter: minExecutionPrice"})
	);

	let query = format!(
		"{}&minExecutionPrice=1&maxExecutionPrice=2&minExecutionTime=10&maxExecutionTime=20\
		&oracleFeedId=0xff61491a931112ddf1bd8147cd1b641375f79f5825126d665480874634fd0ace\
		&customOrderType=2",
		INSTANT_QUERY
	);
	let (status, body) = get(&app(), &format!("/conditionalOrder?{}", query)).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["orderPayload"]["maxExecutionTime"], "20");
	assert_eq!(body["transferPayload"]["permit"]["deadline"], "20");
}

#[tokio::test]
async fn test_publish_get_and_remove() {
	let app = app();
	let (_, order) = get(&app, &format!("/instantOrder?{}", INSTANT_QUERY)).await;
	let witness = order["transferPayload"]["witness"].as_str().unwrap().to_string();

	let (status, body) = post_json(&app, "/publishOrder", &order).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({"success": true}));

	let (status, stored) = get(&app, &format!("/orders/{}", witness)).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(stored, order);

	let (_, all) = get(&app, "/orders").await;
	assert_eq!(all, json!([order]));

	let (status, body) = post_json(
		&app,
		"/removeOrder",
		&json!({"transferPayload": {"witness": witness}}),
	)
	.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({"success": true}));

	let (status, _) = get(&app, &format!("/orders/{}", witness)).await;
	assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_witness_is_rejected() {
	let app = app();
	let invalid = json!({"error": "Invalid payload or missing witness"});

	let (status, body) = post_json(&app, "/removeOrder", &json!({"transferPayload": {}})).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body, invalid);

	let (_, mut order) = get(&app, &format!("/instantOrder?{}", INSTANT_QUERY)).await;
	order["transferPayload"]
		.as_object_mut()
		.unwrap()
		.remove("witness");
	let (status, body) = post_json(&app, "/publishOrder", &order).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body, invalid);

	let (status, body) = post_json(&app, "/publishOrder", &json!("not an order")).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body, invalid);
}

#[tokio::test]
async fn test_chain_queries() {
	let app = app();

	let (status, body) = get(&app, "/integratedChains").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(
		body,
		json!({
			"base": {"isIntegratedChain": true, "tokenStandard": "erc20"},
			"solana": {"isIntegratedChain": false, "tokenStandard": "spl"}
		})
	);

	let (status, body) = get(&app, "/isIntegratedChain?chain=Base").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({"base": true}));

	for uri in ["/isIntegratedChain?chain=solana", "/isIntegratedChain"] {
		let (status, body) = get(&app, uri).await;
		assert_eq!(status, StatusCode::NOT_FOUND);
		assert_eq!(body, json!({"error": "Chain not found"}));
	}
}

#[tokio::test]
async fn test_gasless_tokens() {
	let app = app();

	let (status, body) = get(&app, "/gaslessTokens?chain=base").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body.as_array().unwrap().len(), 2);
	assert_eq!(body[0]["symbol"], "USDC");
	assert_eq!(body[1]["symbol"], "WBTC");

	let (status, body) = get(&app, "/gaslessLimitTokens?chain=base").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!(["usdc"]));

	let (status, _) = get(&app, "/gaslessTokens?chain=ethereum").await;
	assert_eq!(status, StatusCode::NOT_FOUND);

	let (status, body) = get(&app_with(true), "/gaslessTokens?chain=base").await;
	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(body, json!({"error": "Failed to fetch tokens"}));
}

#[tokio::test]
async fn test_health() {
	let (status, _) = get(&app(), "/health").await;
	assert_eq!(status, StatusCode::OK);
}
