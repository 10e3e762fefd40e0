//! The relayer's signing credential.
//!
//! The funded identity used to broadcast transactions is isolated behind
//! [`AccountInterface`] so the credential source (local key, remote signer,
//! hardware module) can change without touching relay logic. The credential
//! is held for the process lifetime and is never derived from user input.

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use async_trait::async_trait;
use thiserror::Error;

pub mod implementations {
	pub mod local;
}

#[derive(Debug, Error)]
pub enum AccountError {
	#[error("Invalid key: {0}")]
	InvalidKey(String),
	#[error("Provider error: {0}")]
	Provider(String),
}

/// Capability interface for the relayer credential.
#[async_trait]
pub trait AccountInterface: Send + Sync {
	/// The account address transactions are sent from.
	async fn address(&self) -> Result<Address, AccountError>;

	/// Wallet handle handed to the RPC provider for transaction signing.
	fn wallet(&self) -> EthereumWallet;
}

/// High-level account service wrapping a credential implementation.
pub struct AccountService {
	provider: Box<dyn AccountInterface>,
}

impl AccountService {
	pub fn new(provider: Box<dyn AccountInterface>) -> Self {
		Self { provider }
	}

	pub async fn address(&self) -> Result<Address, AccountError> {
		self.provider.address().await
	}

	pub fn wallet(&self) -> EthereumWallet {
		self.provider.wallet()
	}
}
