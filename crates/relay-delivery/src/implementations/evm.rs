//! EVM transaction delivery over an Alloy HTTP provider.
//!
//! The provider carries the relayer wallet, so submissions are signed with
//! the funded credential and gas, chain-id and chain-level nonce fields are
//! completed by the provider's fill stack.

use crate::{DeliveryError, DeliveryInterface};
use alloy::network::EthereumWallet;
use alloy::primitives::TxHash;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use relay_types::{Transaction, TransactionReceipt};
use std::time::Duration;

/// Utility function to truncate a transaction hash for display.
fn truncate_hash(hash: &TxHash) -> String {
	let hash_str = hex::encode(hash);
	if hash_str.len() <= 8 {
		hash_str
	} else {
		format!("{}..", &hash_str[..8])
	}
}

/// Alloy-based EVM delivery implementation.
pub struct EvmDelivery {
	provider: DynProvider,
}

impl EvmDelivery {
	/// Connects to the RPC endpoint with the relayer wallet attached.
	pub fn connect(rpc_url: &str, wallet: EthereumWallet) -> Result<Self, DeliveryError> {
		let url = rpc_url
			.parse()
			.map_err(|e| DeliveryError::Network(format!("Invalid RPC URL: {}", e)))?;

		let provider = ProviderBuilder::new().wallet(wallet).connect_http(url).erased();

		Ok(Self { provider })
	}
}

#[async_trait]
impl DeliveryInterface for EvmDelivery {
	async fn chain_id(&self) -> Result<u64, DeliveryError> {
		self.provider
			.get_chain_id()
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to query chain id: {}", e)))
	}

	async fn submit(&self, tx: Transaction) -> Result<TxHash, DeliveryError> {
		let request: TransactionRequest = tx.into();

		let pending = self
			.provider
			.send_transaction(request)
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to send transaction: {}", e)))?;

		let tx_hash = *pending.tx_hash();
		tracing::info!(tx_hash = %truncate_hash(&tx_hash), "Submitted transaction");

		Ok(tx_hash)
	}

	async fn wait_for_confirmation(
		&self,
		hash: TxHash,
		confirmations: u64,
		timeout: Duration,
	) -> Result<TransactionReceipt, DeliveryError> {
		let poll_interval = Duration::from_secs(2);
		let start = tokio::time::Instant::now();

		tracing::info!(
			tx_hash = %truncate_hash(&hash),
			"Waiting for {} confirmations (timeout: {}s)",
			confirmations,
			timeout.as_secs()
		);

		loop {
			if start.elapsed() > timeout {
				return Err(DeliveryError::Timeout(timeout.as_secs()));
			}

			let receipt = match self.provider.get_transaction_receipt(hash).await {
				Ok(Some(receipt)) => receipt,
				Ok(None) => {
					// Not yet mined.
					tokio::time::sleep(poll_interval).await;
					continue;
				}
				Err(e) => {
					return Err(DeliveryError::Network(format!(
						"Failed to get receipt: {}",
						e
					)));
				}
			};

			let current_block = self.provider.get_block_number().await.map_err(|e| {
				DeliveryError::Network(format!("Failed to get block number: {}", e))
			})?;

			let tx_block = receipt.block_number.unwrap_or(0);
			let current_confirmations = current_block.saturating_sub(tx_block);

			if current_confirmations >= confirmations {
				return Ok(TransactionReceipt {
					hash: receipt.transaction_hash,
					block_number: tx_block,
					success: receipt.status(),
				});
			}

			tracing::debug!(
				"Waiting for {} more confirmations...",
				confirmations.saturating_sub(current_confirmations)
			);

			tokio::time::sleep(poll_interval).await;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy::primitives::B256;

	#[test]
	fn test_truncate_hash() {
		let hash = B256::repeat_byte(0xab);
		assert_eq!(truncate_hash(&hash), "abababab..");
	}

	#[test]
	fn test_connect_rejects_bad_url() {
		let wallet = EthereumWallet::from(
			"0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
				.parse::<alloy::signers::local::PrivateKeySigner>()
				.unwrap(),
		);
		let result = EvmDelivery::connect("not a url", wallet);
		assert!(matches!(result, Err(DeliveryError::Network(_))));
	}
}
