use crate::witness::WITNESS_TYPE_STRING;
use alloy_primitives::{Address, Bytes, B256, U256};
use swiftx_types::{
	OrderPayload, PermitTransferFrom, SignatureTransferDetails, TokenPermissions, TransferPayload,
};

/// Builds the unsigned Permit2 transfer that funds `payload`.
///
/// The permit expires with the order (`maxExecutionTime`) and moves the full
/// input amount from `owner` to the SwiftX contract.
pub fn build_transfer_payload(
	payload: &OrderPayload,
	witness: B256,
	owner: Address,
	swift: Address,
) -> TransferPayload {
	TransferPayload {
		permit: PermitTransferFrom {
			permitted: TokenPermissions {
				token: payload.token_in,
				amount: payload.amount_in,
			},
			nonce: payload.nonce,
			deadline: U256::from(payload.max_execution_time),
		},
		transfer_details: SignatureTransferDetails {
			to: swift,
			requested_amount: payload.amount_in,
		},
		owner,
		witness_type_string: WITNESS_TYPE_STRING.to_string(),
		witness,
		signature: Bytes::new(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fixtures::sample_payload;
	use alloy_primitives::address;

	#[test]
	fn test_transfer_mirrors_order() {
		let payload = sample_payload();
		let owner = address!("1F5781Fce9Ee70eC54047A219c9F128972582eB3");
		let swift = address!("5D9C504b3F02611912Af20ED39E60C539621E678");
		let witness = B256::repeat_byte(0x77);

		let transfer = build_transfer_payload(&payload, witness, owner, swift);

		assert_eq!(transfer.permit.permitted.token, payload.token_in);
		assert_eq!(transfer.permit.permitted.amount, payload.amount_in);
		assert_eq!(transfer.permit.nonce, payload.nonce);
		assert_eq!(transfer.permit.deadline, U256::from(payload.max_execution_time));
		assert_eq!(transfer.transfer_details.to, swift);
		assert_eq!(transfer.transfer_details.requested_amount, payload.amount_in);
		assert_eq!(transfer.owner, owner);
		assert_eq!(transfer.witness, witness);
		assert_eq!(transfer.witness_type_string, WITNESS_TYPE_STRING);
		assert!(!transfer.is_signed());
	}
}
