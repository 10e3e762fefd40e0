//! Configuration for the relay service.
//!
//! Settings load from a TOML file, with environment variables taking
//! precedence so deployments can inject the credential and endpoint
//! without a file edit. Every section has usable defaults for a local
//! devnet.

mod loader;

pub use loader::ConfigLoader;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("File not found: {0}")]
	FileNotFound(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),
}

/// Complete relay service configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RelayConfig {
	/// HTTP service identity and bind address.
	pub service: ServiceSettings,
	/// Target chain connection.
	pub network: NetworkSettings,
	/// Relayer credential and confirmation policy.
	pub relayer: RelayerSettings,
	/// Optional on-chain score oracle.
	pub oracle: OracleSettings,
}

/// HTTP service settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceSettings {
	/// Service name used in logs.
	pub name: String,
	/// Bind host.
	pub host: String,
	/// Bind port.
	pub port: u16,
}

impl Default for ServiceSettings {
	fn default() -> Self {
		Self {
			name: "modran-relay".to_string(),
			host: "0.0.0.0".to_string(),
			port: 3001,
		}
	}
}

/// Target chain connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkSettings {
	/// HTTP RPC endpoint URL.
	pub rpc_url: String,
}

impl Default for NetworkSettings {
	fn default() -> Self {
		Self {
			rpc_url: "http://localhost:8545".to_string(),
		}
	}
}

/// Relayer credential and confirmation policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RelayerSettings {
	/// Funded private key (hex). Relay endpoints are disabled when absent.
	pub private_key: Option<String>,
	/// Block confirmations to wait for after submission.
	pub confirmations: u64,
	/// Upper bound on the confirmation wait; expiry is reported as a
	/// submission failure and never retried.
	pub confirmation_timeout_secs: u64,
}

impl Default for RelayerSettings {
	fn default() -> Self {
		Self {
			private_key: None,
			confirmations: 1,
			confirmation_timeout_secs: 120,
		}
	}
}

/// On-chain score oracle settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OracleSettings {
	/// Deployed oracle contract address. Score posts stay local when absent.
	pub address: Option<Address>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = RelayConfig::default();
		assert_eq!(config.service.port, 3001);
		assert_eq!(config.network.rpc_url, "http://localhost:8545");
		assert!(config.relayer.private_key.is_none());
		assert_eq!(config.relayer.confirmations, 1);
		assert_eq!(config.relayer.confirmation_timeout_secs, 120);
		assert!(config.oracle.address.is_none());
	}
}
