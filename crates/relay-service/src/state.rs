//! Shared application state for the relay service.

use alloy::primitives::Address;
use anyhow::Context;
use relay_account::implementations::local::LocalWallet;
use relay_account::AccountService;
use relay_config::RelayConfig;
use relay_delivery::implementations::evm::EvmDelivery;
use relay_delivery::DeliveryService;
use relay_storage::{NonceLedger, ScoreLedger};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// The relay capability: the funded credential's address plus the delivery
/// channel that signs with it.
pub struct Relayer {
	pub address: Address,
	pub delivery: DeliveryService,
}

/// State shared by all request handlers.
///
/// The ledgers are always present; the relayer is `None` when no credential
/// is configured, which disables the relay endpoints (and on-chain score
/// mirroring) without taking down the rest of the service.
#[derive(Clone)]
pub struct AppState {
	pub nonces: Arc<NonceLedger>,
	pub scores: Arc<ScoreLedger>,
	pub relayer: Option<Arc<Relayer>>,
	pub oracle: Option<Address>,
}

impl AppState {
	/// Wires the service from configuration.
	pub async fn from_config(config: &RelayConfig) -> anyhow::Result<Self> {
		let relayer = match &config.relayer.private_key {
			Some(key) => {
				let account = AccountService::new(Box::new(
					LocalWallet::new(key).context("Failed to load relayer key")?,
				));
				let address = account
					.address()
					.await
					.context("Failed to derive relayer address")?;

				let implementation = EvmDelivery::connect(&config.network.rpc_url, account.wallet())
					.context("Failed to connect delivery provider")?;
				let delivery = DeliveryService::new(
					Box::new(implementation),
					config.relayer.confirmations,
					Duration::from_secs(config.relayer.confirmation_timeout_secs),
				);

				info!(relayer = %address, rpc = %config.network.rpc_url, "Relayer credential loaded");
				Some(Arc::new(Relayer { address, delivery }))
			}
			None => {
				warn!("RELAYER_PRIVATE_KEY not set - relay endpoints will be disabled");
				None
			}
		};

		if config.oracle.address.is_some() && relayer.is_none() {
			warn!("Score oracle configured without relayer credential - scores stay local");
		}

		Ok(Self {
			nonces: Arc::new(NonceLedger::new()),
			scores: Arc::new(ScoreLedger::new()),
			relayer,
			oracle: config.oracle.address,
		})
	}
}
