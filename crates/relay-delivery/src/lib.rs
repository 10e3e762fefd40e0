//! Transaction submission and confirmation tracking.
//!
//! [`DeliveryInterface`] is the boundary to the external ledger; the alloy
//! HTTP implementation lives in [`implementations::evm`]. [`DeliveryService`]
//! wraps an implementation and owns the one piece of policy the interface
//! must not: outbound submissions are serialized so concurrent relay
//! requests never collide on the relayer's chain-level nonce slot.

pub mod implementations {
	pub mod evm;
}

use alloy::primitives::TxHash;
use async_trait::async_trait;
use relay_types::{Transaction, TransactionReceipt};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::error;

#[derive(Debug, Error)]
pub enum DeliveryError {
	/// RPC transport or broadcast failure.
	#[error("Network error: {0}")]
	Network(String),

	/// The transaction was mined but execution failed.
	#[error("transaction {hash} reverted on chain")]
	Reverted { hash: TxHash },

	/// The confirmation wait expired. The submission is not retried; its
	/// outcome on chain stays unknown.
	#[error("timed out after {0}s waiting for confirmation")]
	Timeout(u64),
}

/// Interface to the chain the relayer submits through.
#[async_trait]
pub trait DeliveryInterface: Send + Sync {
	/// Chain id reported by the connected endpoint.
	async fn chain_id(&self) -> Result<u64, DeliveryError>;

	/// Signs and broadcasts a transaction, returning its hash once the node
	/// has accepted it.
	async fn submit(&self, tx: Transaction) -> Result<TxHash, DeliveryError>;

	/// Polls until the transaction has `confirmations` or `timeout` elapses.
	async fn wait_for_confirmation(
		&self,
		hash: TxHash,
		confirmations: u64,
		timeout: Duration,
	) -> Result<TransactionReceipt, DeliveryError>;
}

/// High-level delivery service wrapping a chain implementation.
pub struct DeliveryService {
	implementation: Box<dyn DeliveryInterface>,
	/// Held across `submit` so in-flight requests take chain-level nonce
	/// slots one at a time.
	submission_lock: Mutex<()>,
	confirmations: u64,
	confirmation_timeout: Duration,
}

impl DeliveryService {
	pub fn new(
		implementation: Box<dyn DeliveryInterface>,
		confirmations: u64,
		confirmation_timeout: Duration,
	) -> Self {
		Self {
			implementation,
			submission_lock: Mutex::new(()),
			confirmations,
			confirmation_timeout,
		}
	}

	/// Chain id of the connected network, queried live.
	pub async fn chain_id(&self) -> Result<u64, DeliveryError> {
		self.implementation.chain_id().await
	}

	/// Submits `tx` and waits for its on-chain outcome.
	///
	/// The submission lock is released as soon as the node has assigned the
	/// transaction its hash, so confirmation waits overlap freely. A mined
	/// receipt with failed status is reported as [`DeliveryError::Reverted`].
	pub async fn relay(&self, tx: Transaction) -> Result<TransactionReceipt, DeliveryError> {
		let hash = {
			let _guard = self.submission_lock.lock().await;
			self.implementation.submit(tx).await?
		};

		let receipt = self
			.implementation
			.wait_for_confirmation(hash, self.confirmations, self.confirmation_timeout)
			.await?;

		if !receipt.success {
			error!(%hash, block = receipt.block_number, "relayed transaction reverted");
			return Err(DeliveryError::Reverted { hash });
		}

		Ok(receipt)
	}
}
