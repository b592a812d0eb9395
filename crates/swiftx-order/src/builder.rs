//! Order payload assembly.

use crate::request::{OrderKind, OrderRequest};
use crate::transfer::build_transfer_payload;
use crate::witness::compute_witness;
use crate::OrderError;
use alloy_primitives::{Address, B256, U256};
use swiftx_types::{OrderParams, OrderPayload, PartiallyBuiltOrder, Platform, Quote, UniversalAddress};
use tracing::debug;

/// Custom order type of an instant order.
pub const INSTANT_ORDER_TYPE: u8 = 1;

/// Deployment constants applied to every order.
#[derive(Debug, Clone)]
pub struct BuilderSettings {
	/// Lifetime of an instant order, added to the latest block timestamp.
	pub execution_window_secs: u64,
	/// Referrer fee in basis points.
	pub referrer_bps: u8,
	/// Salt carried in `orderParams.random`.
	pub random: B256,
	/// SwiftX contract, the recipient of the permit transfer.
	pub swift: Address,
}

/// Everything fetched for one order request.
#[derive(Debug, Clone, Copy)]
pub struct OrderInputs<'a> {
	pub request: &'a OrderRequest,
	pub quote: &'a Quote,
	pub nonce: U256,
	pub block_timestamp: u64,
	/// Referrer for the destination chain in its native encoding.
	pub referrer: Option<&'a str>,
}

pub struct OrderBuilder {
	settings: BuilderSettings,
}

impl OrderBuilder {
	pub fn new(settings: BuilderSettings) -> Self {
		Self { settings }
	}

	pub fn settings(&self) -> &BuilderSettings {
		&self.settings
	}

	/// Builds the payload, hashes it and attaches the unsigned transfer.
	pub fn build(&self, inputs: &OrderInputs<'_>) -> Result<PartiallyBuiltOrder, OrderError> {
		let order_payload = self.build_payload(inputs)?;
		let witness = compute_witness(&order_payload);
		debug!(%witness, "order witness computed");

		let transfer_payload = build_transfer_payload(
			&order_payload,
			witness,
			inputs.request.owner,
			self.settings.swift,
		);

		Ok(PartiallyBuiltOrder {
			order_payload,
			transfer_payload,
		})
	}

	pub fn build_payload(&self, inputs: &OrderInputs<'_>) -> Result<OrderPayload, OrderError> {
		let request = inputs.request;
		let ts = inputs.block_timestamp;

		let (prices, times, oracle_feed_id, custom_order_type) = match &request.kind {
			OrderKind::Instant => {
				let max_time = ts.checked_add(self.settings.execution_window_secs).ok_or_else(|| {
					OrderError::InvalidQuote(format!("block timestamp {} overflows execution window", ts))
				})?;
				((0, 0), (ts, max_time), B256::ZERO, INSTANT_ORDER_TYPE)
			}
			OrderKind::Conditional(c) => (
				(c.min_execution_price, c.max_execution_price),
				(c.min_execution_time, c.max_execution_time),
				c.oracle_feed_id,
				c.custom_order_type,
			),
		};

		Ok(OrderPayload {
			amount_in: request.amount,
			created_at: U256::from(ts),
			nonce: inputs.nonce,
			oracle_feed_id,
			min_execution_price: prices.0,
			max_execution_price: prices.1,
			min_execution_time: times.0,
			max_execution_time: times.1,
			min_execution_time_interval: 0,
			max_execution_time_interval: 0,
			token_in: request.token_in,
			no_of_orders: 0,
			custom_order_type,
			order_params: self.order_params(inputs)?,
		})
	}

	fn order_params(&self, inputs: &OrderInputs<'_>) -> Result<OrderParams, OrderError> {
		let quote = inputs.quote;
		let platform = Platform::for_chain(&inputs.request.dest_chain);

		let token_out = UniversalAddress::parse(&quote.to_token, platform)?;
		let referrer_addr = match inputs.referrer {
			Some(referrer) => UniversalAddress::parse(referrer, platform)?.as_bytes32(),
			None => B256::ZERO,
		};

		Ok(OrderParams {
			trader: UniversalAddress::from_evm(inputs.request.owner).as_bytes32(),
			token_out: token_out.as_bytes32(),
			min_amount_out: quote.min_amount_out,
			gas_drop: quote.gas_drop,
			cancel_fee: quote.cancel_relayer_fee,
			refund_fee: quote.refund_relayer_fee,
			deadline: quote.deadline,
			dest_addr: inputs.request.dest_addr.as_bytes32(),
			dest_chain_id: quote.dest_chain_id,
			referrer_addr,
			referrer_bps: self.settings.referrer_bps,
			auction_mode: quote.auction_mode,
			random: self.settings.random,
		})
	}
}
