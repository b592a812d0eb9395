//! Witness hashing for the Permit2 `permitWitnessTransferFrom` call.
//!
//! The witness is `keccak256(abi.encode(order))` where the order is encoded
//! as a flat run of static words with `orderParams` inlined as a nested
//! static tuple. No type hash is prepended. Field order and widths are fixed
//! by the SwiftX contract.

use alloy::sol_types::SolValue;
use alloy_primitives::{keccak256, B256};
use swiftx_types::OrderPayload;

mod abi {
	alloy::sol! {
		struct OrderParams {
			bytes32 trader;
			bytes32 tokenOut;
			uint64 minAmountOut;
			uint64 gasDrop;
			uint64 cancelFee;
			uint64 refundFee;
			uint64 deadline;
			bytes32 destAddr;
			uint16 destChainId;
			bytes32 referrerAddr;
			uint8 referrerBps;
			uint8 auctionMode;
			bytes32 random;
		}

		struct OrderPayload {
			uint256 amountIn;
			uint256 createdAt;
			uint256 nonce;
			bytes32 oracleFeedId;
			int64 minExecutionPrice;
			int64 maxExecutionPrice;
			uint64 minExecutionTime;
			uint64 maxExecutionTime;
			uint64 minExecutionTimeInterval;
			uint64 maxExecutionTimeInterval;
			address tokenIn;
			uint8 noOfOrders;
			uint8 customOrderType;
			OrderParams orderParams;
		}
	}
}

macro_rules! witness_type_string {
	() => {
		"OrderPayload witness)OrderPayload(uint256 amountIn,uint256 createdAt,uint256 nonce,bytes32 oracleFeedId,int64 minExecutionPrice,int64 maxExecutionPrice,uint64 minExecutionTime,uint64 maxExecutionTime,uint64 minExecutionTimeInterval,uint64 maxExecutionTimeInterval,address tokenIn,uint8 noOfOrders,uint8 customOrderType,OrderParams orderParams)OrderParams(bytes32 trader,bytes32 tokenOut,uint64 minAmountOut,uint64 gasDrop,uint64 cancelFee,uint64 refundFee,uint64 deadline,bytes32 destAddr,uint16 destChainId,bytes32 referrerAddr,uint8 referrerBps,uint8 auctionMode,bytes32 random)TokenPermissions(address token,uint256 amount)"
	};
}

/// Suffix passed to Permit2 as `witnessTypeString`.
pub const WITNESS_TYPE_STRING: &str = witness_type_string!();

/// Complete EIP-712 type of the permit the owner signs.
pub const PERMIT_WITNESS_TYPE_STRING: &str = concat!(
	"PermitWitnessTransferFrom(TokenPermissions permitted,address spender,uint256 nonce,uint256 deadline,",
	witness_type_string!()
);

impl From<&OrderPayload> for abi::OrderPayload {
	fn from(p: &OrderPayload) -> Self {
		let o = &p.order_params;
		abi::OrderPayload {
			amountIn: p.amount_in,
			createdAt: p.created_at,
			nonce: p.nonce,
			oracleFeedId: p.oracle_feed_id,
			minExecutionPrice: p.min_execution_price,
			maxExecutionPrice: p.max_execution_price,
			minExecutionTime: p.min_execution_time,
			maxExecutionTime: p.max_execution_time,
			minExecutionTimeInterval: p.min_execution_time_interval,
			maxExecutionTimeInterval: p.max_execution_time_interval,
			tokenIn: p.token_in,
			noOfOrders: p.no_of_orders,
			customOrderType: p.custom_order_type,
			orderParams: abi::OrderParams {
				trader: o.trader,
				tokenOut: o.token_out,
				minAmountOut: o.min_amount_out,
				gasDrop: o.gas_drop,
				cancelFee: o.cancel_fee,
				refundFee: o.refund_fee,
				deadline: o.deadline,
				destAddr: o.dest_addr,
				destChainId: o.dest_chain_id,
				referrerAddr: o.referrer_addr,
				referrerBps: o.referrer_bps,
				auctionMode: o.auction_mode,
				random: o.random,
			},
		}
	}
}

/// ABI encoding of the order: 26 static 32-byte words.
pub fn encode_order(payload: &OrderPayload) -> Vec<u8> {
	abi::OrderPayload::from(payload).abi_encode()
}

pub fn compute_witness(payload: &OrderPayload) -> B256 {
	keccak256(encode_order(payload))
}
