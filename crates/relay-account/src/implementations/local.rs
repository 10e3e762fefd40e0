//! Local private-key credential using Alloy's signer.

use crate::{AccountError, AccountInterface};
use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;

/// Credential backed by a locally held private key.
///
/// Suitable for development and single-operator deployments where key
/// management simplicity is preferred.
pub struct LocalWallet {
	signer: PrivateKeySigner,
}

impl LocalWallet {
	/// Creates a wallet from a hex-encoded private key (0x prefix optional).
	pub fn new(private_key_hex: &str) -> Result<Self, AccountError> {
		let signer = private_key_hex
			.parse::<PrivateKeySigner>()
			.map_err(|e| AccountError::InvalidKey(format!("Invalid private key: {}", e)))?;

		Ok(Self { signer })
	}
}

#[async_trait]
impl AccountInterface for LocalWallet {
	async fn address(&self) -> Result<Address, AccountError> {
		Ok(self.signer.address())
	}

	fn wallet(&self) -> EthereumWallet {
		EthereumWallet::from(self.signer.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::AccountService;
	use alloy::network::NetworkWallet;
	use alloy::network::Ethereum;

	// Well-known devnet key 0.
	const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
	const DEV_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

	#[tokio::test]
	async fn test_address_derivation() {
		let wallet = LocalWallet::new(DEV_KEY).unwrap();
		let address = wallet.address().await.unwrap();
		assert_eq!(address, DEV_ADDRESS.parse::<Address>().unwrap());
	}

	#[tokio::test]
	async fn test_prefix_is_optional() {
		let with_prefix = LocalWallet::new(DEV_KEY).unwrap();
		let without_prefix = LocalWallet::new(DEV_KEY.strip_prefix("0x").unwrap()).unwrap();
		assert_eq!(
			with_prefix.address().await.unwrap(),
			without_prefix.address().await.unwrap()
		);
	}

	#[test]
	fn test_invalid_key_rejected() {
		assert!(matches!(
			LocalWallet::new("0x1234"),
			Err(AccountError::InvalidKey(_))
		));
		assert!(matches!(
			LocalWallet::new("not hex at all"),
			Err(AccountError::InvalidKey(_))
		));
	}

	#[tokio::test]
	async fn test_service_exposes_signing_wallet() {
		let service = AccountService::new(Box::new(LocalWallet::new(DEV_KEY).unwrap()));
		let address = service.address().await.unwrap();
		let wallet = service.wallet();
		assert_eq!(
			NetworkWallet::<Ethereum>::default_signer_address(&wallet),
			address
		);
	}
}
