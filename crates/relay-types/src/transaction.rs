//! Outbound transaction types.
//!
//! [`Transaction`] is the relayer's own call to the network, signed with the
//! funded credential. Fields left unset are completed by the provider's
//! fill stack at submission time.

use alloy::primitives::{Address, Bytes, TxHash, TxKind, U256};
use alloy::rpc::types::{TransactionInput, TransactionRequest};
use serde::{Deserialize, Serialize};

/// An outbound blockchain transaction.
#[derive(Debug, Clone, Default)]
pub struct Transaction {
	/// Recipient address (None for contract creation).
	pub to: Option<Address>,
	/// Call data forwarded to the target.
	pub data: Vec<u8>,
	/// Value transferred in native currency.
	pub value: U256,
	/// Chain ID for replay protection.
	pub chain_id: Option<u64>,
	/// Chain-level nonce of the sending account.
	pub nonce: Option<u64>,
	/// Gas limit for execution.
	pub gas_limit: Option<u64>,
	/// Legacy gas price.
	pub gas_price: Option<u128>,
	/// Maximum fee per gas (EIP-1559).
	pub max_fee_per_gas: Option<u128>,
	/// Maximum priority fee per gas (EIP-1559).
	pub max_priority_fee_per_gas: Option<u128>,
}

impl From<Transaction> for TransactionRequest {
	fn from(tx: Transaction) -> Self {
		TransactionRequest {
			to: tx.to.map(TxKind::Call),
			value: Some(tx.value),
			chain_id: tx.chain_id,
			nonce: tx.nonce,
			gas: tx.gas_limit,
			gas_price: tx.gas_price,
			max_fee_per_gas: tx.max_fee_per_gas,
			max_priority_fee_per_gas: tx.max_priority_fee_per_gas,
			input: TransactionInput {
				input: Some(Bytes::from(tx.data)),
				data: None,
			},
			..Default::default()
		}
	}
}

/// Execution details of a transaction after inclusion in a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
	/// The hash of the transaction.
	pub hash: TxHash,
	/// The block number where the transaction was included.
	pub block_number: u64,
	/// Whether the transaction executed successfully.
	pub success: bool,
}
