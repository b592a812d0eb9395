use alloy_primitives::{address, b256, B256, U256};
use swiftx_types::{OrderParams, OrderPayload, Quote};

pub fn sample_payload() -> OrderPayload {
	OrderPayload {
		amount_in: U256::from(2_000_000u64),
		created_at: U256::from(1_743_838_000u64),
		nonce: U256::from(11u64),
		oracle_feed_id: b256!("ff61491a931112ddf1bd8147cd1b641375f79f5825126d665480874634fd0ace"),
		min_execution_price: 180_000_000_000,
		max_execution_price: 200_000_000_000,
		min_execution_time: 1_743_838_979,
		max_execution_time: 1_743_859_979,
		min_execution_time_interval: 0,
		max_execution_time_interval: 0,
		token_in: address!("833589fCD6eDb6E08f4c7C32D4f71b54bdA02913"),
		no_of_orders: 0,
		custom_order_type: 2,
		order_params: OrderParams {
			trader: b256!("0000000000000000000000001f5781fce9ee70ec54047a219c9f128972582eb3"),
			token_out: B256::repeat_byte(0x11),
			min_amount_out: 13_100_000,
			gas_drop: 0,
			cancel_fee: 21_000,
			refund_fee: 1_400,
			deadline: 1_743_841_600,
			dest_addr: B256::repeat_byte(0x22),
			dest_chain_id: 1,
			referrer_addr: B256::repeat_byte(0x33),
			referrer_bps: 2,
			auction_mode: 2,
			random: b256!("0000000000000000f2003ec365831e64cc31d9f6f15a2b85399db8d5000960f6"),
		},
	}
}

pub fn sample_quote() -> Quote {
	Quote {
		from_chain: "base".to_string(),
		to_chain: "solana".to_string(),
		from_token: "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913".to_string(),
		to_token: "7vfCXTUXx5WJV5JADk17DUJ4ksgau7utNKj4b963voxs".to_string(),
		dest_chain_id: 1,
		price_feed_id: Some(B256::repeat_byte(0xef)),
		effective_amount_in: 2_000_000,
		min_amount_out: 13_100_000,
		gas_drop: 0,
		cancel_relayer_fee: 21_000,
		refund_relayer_fee: 1_400,
		deadline: 1_743_841_600,
		auction_mode: 2,
	}
}
